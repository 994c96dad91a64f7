pub mod add_comment;
pub mod create_post;
pub mod delete_comment;
pub mod delete_post;
pub mod forgot_password;
pub mod login;
pub mod post_details;
pub mod register;
pub mod set_new_password;
pub mod toggle_like;
pub mod update_comment;
pub mod update_post;
pub mod view_posts;
