pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{NewPost, Post, UpdatePost};
pub use profile::{NewProfile, Profile, UpdateProfile};
pub use subscription::Subscription;
pub use user::{NewUser, UpdateUser, User};
