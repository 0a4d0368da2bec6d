use crate::routes::{
    auth::models::*, auth::*, notifications::models::*, notifications::*, posts::models::*,
    posts::*, search::models::*, search::*, users::models::*, users::*, vacations::models::*,
    vacations::*, Message,
};
use crate::utils::notifications::models::NotificationKind;
use crate::utils::vacations::membership::Membership;
use crate::utils::vacations::models::VacationStatus;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
info(title = "Wayfarer", description = "Travel journal with shared vacations"),
paths(
post_register_user,
post_login_user,
post_logout_user,
post_refresh_user_token,
get_me,
create_vacation,
get_my_vacations,
get_available,
get_vacation,
update_vacation,
delete_vacation,
invite_to_vacation,
accept_vacation_invitation,
decline_vacation_invitation,
leave,
kick_from_vacation,
get_vacation_posts,
add_post_to_vacation,
remove_post_from_vacation,
get_notifications,
delete_notifications,
delete_notification,
get_user_profile,
get_suggested_users,
get_my_following,
get_user_following,
get_user_followers,
post_toggle_follow,
post_update_profile,
get_all,
get_following,
get_vacations_feed,
get_by_user,
get_liked,
create_post,
like_post,
comment_post,
delete_post,
search_users,
search_vacations,
),
components(schemas(
LoginCredentials,
RegisterCredentials,
Message,
UserSummary,
UserProfile,
FollowToggled,
UpdateProfile,
PostView,
CommentView,
CreateComment,
CreatePost,
LikeToggled,
CreateVacation,
UpdateVacation,
VacationView,
VacationCreated,
VacationStatus,
Membership,
InviteUser,
AddPost,
VacationPosts,
NotificationView,
NotificationKind,
VacationSummary,
SearchQuery,
SearchVacationsResult,
)),
tags((name = "auth"),(name = "vacations"),(name = "notifications"),(name = "users"),(name = "posts"),(name = "search"))
)]
pub struct ApiDoc;
