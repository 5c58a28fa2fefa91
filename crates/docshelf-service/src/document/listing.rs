//! Document and trash listings.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use docshelf_core::config::storage::StorageConfig;
use docshelf_core::result::AppResult;
use docshelf_core::traits::{ListOptions, ObjectEntry, ObjectStore};
use docshelf_core::types::ListCursor;
use docshelf_entity::document::key::{self, DecodedName, PRIVATE_CATEGORY, Visibility};
use docshelf_entity::document::{DocumentRecord, TrashRecord};

/// Object attribute carrying a document's category.
pub const CATEGORY_ATTRIBUTE: &str = "category";
/// Object attribute carrying a document's display name.
pub const DISPLAY_NAME_ATTRIBUTE: &str = "display_name";

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPage<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Where the next page starts. `None` once the listing is exhausted.
    #[serde(skip)]
    pub next_cursor: Option<ListCursor>,
}

impl<T> DocumentPage<T> {
    /// Opaque token for the next page, if any.
    pub fn next_token(&self) -> Option<String> {
        self.next_cursor.map(|c| c.to_token())
    }
}

/// Builds document and trash records from object listings.
#[derive(Debug, Clone)]
pub struct DocumentListingService {
    objects: Arc<dyn ObjectStore>,
    page_size: u32,
}

impl DocumentListingService {
    /// Create a listing service. Pages hold `storage.list_page_size`
    /// entries.
    pub fn new(objects: Arc<dyn ObjectStore>, storage: &StorageConfig) -> Self {
        Self {
            objects,
            page_size: storage.list_page_size.max(1),
        }
    }

    /// First page of a user's regular documents followed by the first page
    /// of their private documents.
    ///
    /// A failure listing regular documents is returned. A failure listing
    /// private documents is logged and treated as "no private documents".
    pub async fn list_user_documents(&self, user_id: &str) -> AppResult<Vec<DocumentRecord>> {
        let mut documents = self
            .list_documents_page(user_id, Visibility::Regular, None)
            .await?
            .items;

        match self
            .list_documents_page(user_id, Visibility::Private, None)
            .await
        {
            Ok(page) => documents.extend(page.items),
            Err(e) => {
                warn!(user_id, error = %e, "Failed to list private documents");
            }
        }

        Ok(documents)
    }

    /// First page of a user's trash.
    pub async fn list_user_trash(&self, user_id: &str) -> AppResult<Vec<TrashRecord>> {
        Ok(self.list_trash_page(user_id, None).await?.items)
    }

    /// One page of documents under the given visibility prefix, newest
    /// first. Only entries that look like files (a `.` in the name and a
    /// non-zero size) are returned.
    pub async fn list_documents_page(
        &self,
        user_id: &str,
        visibility: Visibility,
        cursor: Option<ListCursor>,
    ) -> AppResult<DocumentPage<DocumentRecord>> {
        let prefix = key::document_prefix(user_id, visibility);
        let (entries, next_cursor) = self.fetch(&prefix, cursor).await?;

        let items = entries
            .into_iter()
            .filter(is_document)
            .map(|entry| self.document_record(&prefix, entry, visibility))
            .collect();

        Ok(DocumentPage { items, next_cursor })
    }

    /// One page of a user's trash, newest first. No file filter is applied
    /// so zero-size placeholders are carried through.
    pub async fn list_trash_page(
        &self,
        user_id: &str,
        cursor: Option<ListCursor>,
    ) -> AppResult<DocumentPage<TrashRecord>> {
        let prefix = key::trash_prefix(user_id);
        let (entries, next_cursor) = self.fetch(&prefix, cursor).await?;

        let items = entries
            .into_iter()
            .map(|entry| self.trash_record(&prefix, entry))
            .collect();

        Ok(DocumentPage { items, next_cursor })
    }

    /// Every trash entry of a user, following continuation cursors until
    /// the listing is exhausted.
    pub async fn list_all_trash(&self, user_id: &str) -> AppResult<Vec<TrashRecord>> {
        let mut records = Vec::new();
        let mut cursor = None;
        loop {
            let page = self.list_trash_page(user_id, cursor).await?;
            records.extend(page.items);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(records)
    }

    async fn fetch(
        &self,
        prefix: &str,
        cursor: Option<ListCursor>,
    ) -> AppResult<(Vec<ObjectEntry>, Option<ListCursor>)> {
        let cursor = cursor.unwrap_or_default();
        let options = ListOptions::newest_first(self.page_size).with_offset(cursor.offset);
        let entries = self.objects.list(prefix, &options).await?;
        debug!(prefix, offset = cursor.offset, count = entries.len(), "Listed prefix");

        let next = (entries.len() as u64 >= u64::from(self.page_size))
            .then(|| cursor.advance(entries.len()));
        Ok((entries, next))
    }

    fn document_record(
        &self,
        prefix: &str,
        entry: ObjectEntry,
        visibility: Visibility,
    ) -> DocumentRecord {
        let path = key::join(prefix, &entry.name);
        let described = describe(&entry);
        let category = match visibility {
            Visibility::Regular => described.category,
            Visibility::Private => PRIVATE_CATEGORY.to_string(),
        };
        DocumentRecord {
            name: described.display_name,
            public_url: self.objects.public_url(&path),
            path,
            size: entry.size,
            category,
            created_at: entry.created_at,
        }
    }

    fn trash_record(&self, prefix: &str, entry: ObjectEntry) -> TrashRecord {
        let path = key::join(prefix, &entry.name);
        TrashRecord {
            public_url: self.objects.public_url(&path),
            path,
            name: entry.name,
            size: entry.size,
            deleted_at: entry.created_at,
        }
    }
}

fn is_document(entry: &ObjectEntry) -> bool {
    entry.name.contains('.') && entry.size > 0
}

/// Category and display name of an object. Attributes win over whatever
/// the filename encodes.
fn describe(entry: &ObjectEntry) -> DecodedName {
    let decoded = key::decode(&entry.name);
    DecodedName {
        category: entry
            .attributes
            .get(CATEGORY_ATTRIBUTE)
            .cloned()
            .unwrap_or(decoded.category),
        display_name: entry
            .attributes
            .get(DISPLAY_NAME_ATTRIBUTE)
            .cloned()
            .unwrap_or(decoded.display_name),
    }
}
