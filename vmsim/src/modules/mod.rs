pub mod backing_storage;
