use serde::{Deserialize, Serialize};

/// A post as the remote API stores it. The id is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub course: String,
    pub description: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub course: String,
    pub description: String,
}

/// Unsaved values of the two form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub course: String,
    pub description: String,
}

impl Draft {
    pub fn new(course: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            description: description.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.course.is_empty() && self.description.is_empty()
    }

    pub fn clear(&mut self) {
        self.course.clear();
        self.description.clear();
    }

    pub fn to_payload(&self) -> PostPayload {
        PostPayload {
            course: self.course.clone(),
            description: self.description.clone(),
        }
    }
}

impl From<&Post> for Draft {
    fn from(post: &Post) -> Self {
        Self::new(post.course.clone(), post.description.clone())
    }
}
