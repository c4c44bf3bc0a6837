use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite database and make sure every table exists. The DDL is
/// idempotent: each table is created only when `sqlite_master` does not
/// know it yet, so restarts are safe.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    if table_exists(conn, name).await? {
        return Ok(());
    }
    tracing::info!("Creating {} table", name);
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        ddl.to_string(),
    ))
    .await?;
    Ok(())
}

async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(
        conn,
        "a001_user",
        r#"
        CREATE TABLE a001_user (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            external_uid TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            mobile TEXT,
            district TEXT,
            profession TEXT,
            age INTEGER,
            taluk TEXT,
            village TEXT,
            panchayat TEXT,
            profile_image_url TEXT,
            profile_image_ref TEXT,
            is_verified INTEGER NOT NULL DEFAULT 0,
            is_blocked INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a002_admin",
        r#"
        CREATE TABLE a002_admin (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a003_subadmin",
        r#"
        CREATE TABLE a003_subadmin (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            number TEXT,
            qualification TEXT,
            address TEXT,
            districts TEXT NOT NULL DEFAULT '[]',
            page_access TEXT NOT NULL DEFAULT '[]',
            image_url TEXT,
            image_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a004_category",
        r#"
        CREATE TABLE a004_category (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            image_url TEXT,
            image_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a005_subcategory",
        r#"
        CREATE TABLE a005_subcategory (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            category_ref TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a006_product",
        r#"
        CREATE TABLE a006_product (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            category_ref TEXT NOT NULL,
            subcategory_ref TEXT NOT NULL,
            image_url TEXT,
            image_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a007_land",
        r#"
        CREATE TABLE a007_land (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            user_ref TEXT NOT NULL,
            district TEXT,
            taluk TEXT,
            village TEXT,
            panchayat TEXT,
            survey_no TEXT,
            hissa_no TEXT,
            farm_size REAL NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    // Food allocations store acres; machinery/animal columns stay NULL.
    ensure_table(
        conn,
        "a008_land_product",
        r#"
        CREATE TABLE a008_land_product (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            user_ref TEXT NOT NULL,
            land_ref TEXT NOT NULL,
            product_ref TEXT NOT NULL,
            category TEXT NOT NULL,
            acres REAL,
            model_no TEXT,
            registration_no TEXT,
            chassi_no TEXT,
            rc_copy_no TEXT,
            quantity INTEGER,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a009_crop_plan",
        r#"
        CREATE TABLE a009_crop_plan (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            user_ref TEXT NOT NULL,
            land_ref TEXT NOT NULL,
            product_ref TEXT NOT NULL,
            area_acres REAL NOT NULL,
            planning_date TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a010_crop_calendar",
        r#"
        CREATE TABLE a010_crop_calendar (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            subcategory_ref TEXT NOT NULL,
            product_ref TEXT NOT NULL,
            crop_details TEXT,
            cost_estimate TEXT NOT NULL DEFAULT '[]',
            cultivation_tips TEXT NOT NULL DEFAULT '[]',
            pests_and_diseases TEXT NOT NULL DEFAULT '[]',
            stages_selection TEXT NOT NULL DEFAULT '[]',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a011_ad",
        r#"
        CREATE TABLE a011_ad (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            comment TEXT,
            category_ref TEXT NOT NULL,
            subcategory_ref TEXT,
            product_ref TEXT NOT NULL,
            product_name TEXT NOT NULL,
            unit TEXT,
            quantity REAL,
            price REAL,
            districts TEXT NOT NULL DEFAULT '[]',
            ad_type TEXT NOT NULL,
            post_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            scheduled_at TEXT,
            expiry_date TEXT,
            images TEXT NOT NULL DEFAULT '[]',
            video_url TEXT,
            created_by_role TEXT NOT NULL,
            creator_ref TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '{}',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    // Append-only; rows are written in the same transaction as the change
    // they describe.
    ensure_table(
        conn,
        "a011_ad_log",
        r#"
        CREATE TABLE a011_ad_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ad_ref TEXT NOT NULL,
            action TEXT NOT NULL,
            actor_name TEXT,
            actor_role TEXT,
            payload TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a012_news",
        r#"
        CREATE TABLE a012_news (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            url TEXT NOT NULL,
            image_url TEXT,
            image_ref TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a012_news_log",
        r#"
        CREATE TABLE a012_news_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            news_ref TEXT NOT NULL,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            action TEXT NOT NULL,
            actor_name TEXT,
            actor_role TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a013_device_token",
        r#"
        CREATE TABLE a013_device_token (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_ref TEXT NOT NULL,
            token TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "a013_notification_log",
        r#"
        CREATE TABLE a013_notification_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            created_by TEXT,
            created_by_name TEXT,
            type TEXT NOT NULL,
            target_info TEXT,
            recipients_count INTEGER NOT NULL DEFAULT 0,
            payload TEXT,
            sent_at TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "system_log",
        r#"
        CREATE TABLE system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    Ok(())
}
