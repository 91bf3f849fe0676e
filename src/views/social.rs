use serde::Serialize;

use crate::types::{Post, User};

/// Home feed. Posting is local only: nothing is sent anywhere.
#[derive(Debug, Clone)]
pub struct FeedView {
    current_user: User,
    posts: Vec<Post>,
}

impl FeedView {
    pub fn new(current_user: User, posts: Vec<Post>) -> Self {
        Self {
            current_user,
            posts,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Prepend a post by the current user. Blank content is ignored.
    pub fn add_post(&mut self, content: &str) -> Option<&Post> {
        if content.trim().is_empty() {
            return None;
        }
        let post = Post {
            id: format!("p-{}", uuid::Uuid::new_v4()),
            author: self.current_user.clone(),
            timestamp: "Just now".to_string(),
            content: content.to_string(),
            image_url: None,
            video_url: None,
            likes: 0,
            comments: 0,
        };
        self.posts.insert(0, post);
        self.posts.first()
    }
}

#[derive(Debug, Clone)]
pub struct ContactsView {
    contacts: Vec<User>,
}

impl ContactsView {
    pub fn new(contacts: Vec<User>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[User] {
        &self.contacts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProfileStats {
    pub posts: usize,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Clone)]
pub struct ProfileView {
    user: User,
    posts: Vec<Post>,
}

impl ProfileView {
    pub fn new(user: User, posts: Vec<Post>) -> Self {
        Self { user, posts }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Only the profile owner's posts; anything else handed in is skipped.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.author.id == self.user.id)
    }

    pub fn stats(&self) -> ProfileStats {
        self.posts().fold(ProfileStats::default(), |mut acc, post| {
            acc.posts += 1;
            acc.likes += u64::from(post.likes);
            acc.comments += u64::from(post.comments);
            acc
        })
    }
}
