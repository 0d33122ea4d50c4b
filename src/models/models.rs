use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub user_id: u64,
    pub content: String,
    pub created_at: String,
}

/// Edge with composite key (user_id, post_id). Toggled, never duplicated.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: u64,
    pub post_id: u64,
}

/// Edge with composite key (follower_id, following_id); follower_id must
/// never equal following_id.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub follower_id: u64,
    pub following_id: u64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub user_id: u64,
    pub created_at: String,
}

/// The whole persisted document: five flat collections plus the id counter.
/// Loaded in full on open and rewritten in full after every mutation.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub follows: Vec<Follow>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for Database {
    fn default() -> Self {
        Database {
            users: Vec::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            follows: Vec::new(),
            likes: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl Database {
    /// Monotonic ids shared across all entity kinds. The counter is part of
    /// the persisted document, so ids stay unique across restarts.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
