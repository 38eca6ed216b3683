pub mod arbox;
