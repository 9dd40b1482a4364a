mod user;
pub use self::user::User;

mod photo;
pub use self::photo::{Photo, PhotoPage};

mod video;
pub use self::video::{Video, VideoFile, VideoPage, VideoPicture};
