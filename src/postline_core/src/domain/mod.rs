pub mod comment;
pub mod email;
pub mod ids;
pub mod like;
pub mod password;
pub mod post;
pub mod reset_code;
pub mod user;
pub mod username;
