mod comments;
mod helpers;
mod postgres;
mod posts;
mod users;
