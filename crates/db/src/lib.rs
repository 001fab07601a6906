//! Document-store access for the menagerie API.
//!
//! Records are read through per-kind normalizers (see [`models`]) so that
//! documents written by older clients still come back in canonical shape.

use std::time::Duration;

use bson::{doc, Document};
use menagerie_core::resource::ResourceKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

pub mod models;
pub mod repositories;

/// Handle to the application database. Cheap to clone; the underlying
/// client pools connections and is safe to share across tasks.
pub type Db = mongodb::Database;

/// How long a single operation waits to find a usable server.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect to `uri` and select `database`.
///
/// The driver connects lazily; call [`health_check`] to verify reachability.
pub async fn connect(uri: &str, database: &str) -> Result<Db, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("menagerie-api".to_string());
    if options.server_selection_timeout.is_none() {
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    }
    let client = Client::with_options(options)?;
    Ok(client.database(database))
}

/// Round-trip a `ping` to the server.
pub async fn health_check(db: &Db) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Untyped collection for `kind`. Documents stay raw until normalized.
pub fn collection(db: &Db, kind: ResourceKind) -> Collection<Document> {
    db.collection::<Document>(kind.collection())
}
