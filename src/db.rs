use anyhow::Context;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::Config;
use crate::model::attendance::AttendanceDoc;
use crate::model::employee::EmployeeDoc;

const EMPLOYEES: &str = "employees";
const ATTENDANCE: &str = "attendance";

/// Owned handle to the document store. Constructed once at startup and handed
/// to handlers through `web::Data`; collections are cheap clones of the
/// underlying pooled client.
pub struct Store {
    client: Client,
    db: Database,
}

impl Store {
    /// Connects and ensures the unique indexes exist. Index creation is
    /// idempotent, so this is safe on every process start; it also forces a
    /// round-trip, making an unreachable store fatal to startup.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(&config.mongodb_url)
            .await
            .context("failed to initialize MongoDB client")?;
        let db = client.database(&config.database_name);

        Self::ensure_indexes(&db)
            .await
            .context("failed to create indexes")?;

        Ok(Self { client, db })
    }

    async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        let employees: Collection<EmployeeDoc> = db.collection(EMPLOYEES);
        employees
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "employee_id": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
        employees
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        // One attendance record per employee per day.
        let attendance: Collection<AttendanceDoc> = db.collection(ATTENDANCE);
        attendance
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "employee_id": 1, "date": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        Ok(())
    }

    pub fn employees(&self) -> Collection<EmployeeDoc> {
        self.db.collection(EMPLOYEES)
    }

    pub fn attendance(&self) -> Collection<AttendanceDoc> {
        self.db.collection(ATTENDANCE)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
