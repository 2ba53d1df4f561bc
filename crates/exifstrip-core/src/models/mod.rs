//! Domain models.

pub mod image;
pub mod notification;

pub use image::{ImageObject, SanitizedImageObject};
pub use notification::{
    decode_object_key, NotificationError, NotificationItem, ObjectRef, S3Bucket, S3Entity,
    S3EventNotification, S3EventRecord, S3Object,
};
