pub mod key_uploader;
