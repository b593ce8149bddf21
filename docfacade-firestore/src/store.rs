use async_trait::async_trait;
use firestore::{
    FirestoreDb, FirestoreDbOptions, FirestoreWritePrecondition, errors::FirestoreError,
};
use futures::TryStreamExt;
use std::fmt;
use tracing::instrument;

use docfacade_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::Credentials,
    document::DocumentData,
    error::{FacadeError, FacadeResult},
    path::StorePath,
};

use crate::field_path::FieldPath;

/// A document reference split the way the Firestore API addresses it.
struct DocumentLocation {
    parent: String,
    collection: String,
    document_id: String,
}

fn remote_error(path: &StorePath, error: FirestoreError) -> FacadeError {
    FacadeError::Remote(format!("Firestore '{path}' error: {error}"))
}

/// Maps the error of a write that requires an existing document.
fn existing_write_error(path: &StorePath, error: FirestoreError) -> FacadeError {
    match error {
        FirestoreError::DataNotFoundError(_) => FacadeError::NotFound(path.to_string()),
        error => remote_error(path, error),
    }
}

/// Firestore-backed document store.
///
/// Paths are resolved under the database's documents root. Updates and deletes carry an
/// existence precondition, so a missing document fails with [`FacadeError::NotFound`]
/// and is never recreated by a masked write. Fields under the `_firestore_` prefix are
/// reserved for document metadata and rejected on write.
pub struct FirestoreStore {
    db: FirestoreDb,
}

impl FirestoreStore {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    pub fn builder() -> FirestoreStoreBuilder {
        FirestoreStoreBuilder
    }

    pub fn db(&self) -> &FirestoreDb {
        &self.db
    }

    fn parent_path(&self, segments: &[String]) -> String {
        let documents_path = self.db.get_documents_path();

        match segments.is_empty() {
            true => documents_path.to_string(),
            false => format!("{documents_path}/{}", segments.join("/")),
        }
    }

    fn locate_document(&self, path: &StorePath) -> FacadeResult<DocumentLocation> {
        let segments = path.segments();

        if !path.is_document() {
            return Err(FacadeError::Remote(format!(
                "invalid document reference '{path}': document references must have an even number of segments"
            )));
        }

        let len = segments.len();

        Ok(DocumentLocation {
            parent: self.parent_path(&segments[..len - 2]),
            collection: segments[len - 2].clone(),
            document_id: segments[len - 1].clone(),
        })
    }

    fn locate_collection(&self, path: &StorePath) -> FacadeResult<(String, String)> {
        let segments = path.segments();

        if !path.is_collection() {
            return Err(FacadeError::Remote(format!(
                "invalid collection reference '{path}': collection references must have an odd number of segments"
            )));
        }

        let len = segments.len();

        Ok((
            self.parent_path(&segments[..len - 1]),
            segments[len - 1].clone(),
        ))
    }

    async fn read(
        &self,
        path: &StorePath,
        location: &DocumentLocation,
    ) -> FacadeResult<Option<DocumentData>> {
        let doc: Option<DocumentData> = self
            .db
            .fluent()
            .select()
            .by_id_in(&location.collection)
            .parent(&location.parent)
            .obj::<DocumentData>()
            .one(&location.document_id)
            .await
            .map_err(|e| remote_error(path, e))?;

        Ok(doc.map(|mut data| {
            FieldPath::strip_metadata(&mut data);
            data
        }))
    }
}

impl fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("documents_path", self.db.get_documents_path())
            .finish()
    }
}

#[async_trait]
impl StoreBackend for FirestoreStore {
    #[instrument(name = "firestore::get", level = "trace", skip(self))]
    async fn get_document(&self, path: &StorePath) -> FacadeResult<Option<DocumentData>> {
        let location = self.locate_document(path)?;

        self.read(path, &location).await
    }

    #[instrument(name = "firestore::set", level = "trace", skip(self, data))]
    async fn set_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        let location = self.locate_document(path)?;
        FieldPath::check_reserved(&data)?;

        self.db
            .fluent()
            .update()
            .in_col(&location.collection)
            .document_id(&location.document_id)
            .parent(&location.parent)
            .object(&data)
            .execute::<DocumentData>()
            .await
            .map_err(|e| remote_error(path, e))?;

        Ok(())
    }

    #[instrument(name = "firestore::update", level = "trace", skip(self, data))]
    async fn update_document(&self, path: &StorePath, data: DocumentData) -> FacadeResult<()> {
        let location = self.locate_document(path)?;
        FieldPath::check_reserved(&data)?;

        // Without the precondition a masked write would create the missing document.
        self.db
            .fluent()
            .update()
            .fields(data.keys().map(|field| FieldPath::escape(field)))
            .in_col(&location.collection)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(&location.document_id)
            .parent(&location.parent)
            .object(&data)
            .execute::<DocumentData>()
            .await
            .map_err(|e| existing_write_error(path, e))?;

        Ok(())
    }

    #[instrument(name = "firestore::delete", level = "trace", skip(self))]
    async fn delete_document(&self, path: &StorePath) -> FacadeResult<()> {
        let location = self.locate_document(path)?;

        self.db
            .fluent()
            .delete()
            .from(location.collection.as_str())
            .document_id(&location.document_id)
            .parent(&location.parent)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .execute()
            .await
            .map_err(|e| existing_write_error(path, e))?;

        Ok(())
    }

    #[instrument(name = "firestore::list", level = "trace", skip(self))]
    async fn list_documents(
        &self,
        collection: &StorePath,
    ) -> FacadeResult<Vec<(String, DocumentData)>> {
        let (parent, collection_id) = self.locate_collection(collection)?;

        let documents: Vec<DocumentData> = self
            .db
            .fluent()
            .list()
            .from(collection_id.as_str())
            .parent(&parent)
            .obj::<DocumentData>()
            .stream_all_with_errors()
            .await
            .map_err(|e| remote_error(collection, e))?
            .try_collect()
            .await
            .map_err(|e| remote_error(collection, e))?;

        documents
            .into_iter()
            .map(|mut data| match FieldPath::strip_metadata(&mut data) {
                Some(id) => Ok((id, data)),
                None => Err(FacadeError::Remote(format!(
                    "Firestore '{collection}' returned a document without id"
                ))),
            })
            .collect()
    }
}

/// Builder connecting a [`FirestoreStore`] from resolved credentials.
///
/// Inline client credentials connect with the application default credentials of the
/// environment for the configured project; service-account credentials use the key file.
#[derive(Debug, Default)]
pub struct FirestoreStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for FirestoreStoreBuilder {
    type Backend = FirestoreStore;

    async fn build(self, credentials: Credentials) -> FacadeResult<Self::Backend> {
        let db = match credentials {
            Credentials::Client(config) => {
                FirestoreDb::with_options(FirestoreDbOptions::new(config.project_id)).await
            }
            Credentials::ServiceAccount { key, key_path } => {
                FirestoreDb::with_options_service_account_key_file(
                    FirestoreDbOptions::new(key.project_id),
                    key_path,
                )
                .await
            }
        }
        .map_err(|e| FacadeError::Remote(format!("Firestore connection failed: {e}")))?;

        Ok(FirestoreStore::new(db))
    }
}
