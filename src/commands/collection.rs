//! Collection Commands

use serde::Serialize;

use super::{call, call_unit, fetch, IdArgs};
use crate::models::Collection;

#[derive(Serialize)]
struct AddCollectionArgs<'a> {
    id: &'a str,
    name: &'a str,
    icon: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct RenameCollectionArgs<'a> {
    id: &'a str,
    name: &'a str,
}

pub async fn get_collections() -> Result<Vec<Collection>, String> {
    fetch("get_collections").await
}

pub async fn get_archived_collections() -> Result<Vec<Collection>, String> {
    fetch("get_archived_collections").await
}

/// Insert with the client-generated id; returns the stored row
pub async fn add_collection(collection: &Collection) -> Result<Collection, String> {
    let args = AddCollectionArgs {
        id: &collection.id,
        name: &collection.name,
        icon: &collection.icon,
        color: &collection.color,
    };
    call("add_collection", &args).await
}

pub async fn rename_collection(id: &str, name: &str) -> Result<(), String> {
    call_unit("rename_collection", &RenameCollectionArgs { id, name }).await
}

pub async fn archive_collection(id: &str) -> Result<(), String> {
    call_unit("archive_collection", &IdArgs { id }).await
}

pub async fn restore_collection(id: &str) -> Result<(), String> {
    call_unit("restore_collection", &IdArgs { id }).await
}

pub async fn delete_collection(id: &str) -> Result<(), String> {
    call_unit("delete_collection", &IdArgs { id }).await
}
