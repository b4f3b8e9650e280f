//! Collection names, document conversion and write acknowledgments for the
//! Miah Kitchen store. Nothing in here talks to the network except `db`.

pub mod ack;
pub mod collection;
pub mod db;
pub mod document;
pub mod errors;

pub use ack::{DeleteAck, InsertAck};
pub use collection::Collection;
pub use mongodb::bson::{oid::ObjectId, Document};
