pub mod request_reply;
