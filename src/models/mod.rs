pub mod post;

pub use post::{Draft, Post, PostPayload};
