//! Database schema initialization

use sqlx::SqlitePool;

/// Create the settings table if it does not exist yet
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		\"group\" text NOT NULL,
		key text NOT NULL,
		value text,
		type text NOT NULL DEFAULT 'string',
		updated_at integer NOT NULL DEFAULT (unixepoch()),
		PRIMARY KEY(\"group\", key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
