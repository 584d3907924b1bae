mod kv;

pub use kv::{
    load_json_or_default, store_json, FileStore, KeyValueStore, MemoryStore, Result,
    StorageError,
};
