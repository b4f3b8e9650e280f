pub mod mongo;

pub use mongo::MongoDocumentStore;
