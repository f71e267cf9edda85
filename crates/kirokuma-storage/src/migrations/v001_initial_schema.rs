//! v001: epochs, meal_records, artifacts.

/// `idx_epochs_one_active` makes a second active epoch per user impossible
/// to commit, whichever connection or process attempts it.
pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS epochs (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    ended_at    TEXT
);

CREATE INDEX IF NOT EXISTS idx_epochs_user ON epochs(user_id, created_at);
CREATE UNIQUE INDEX IF NOT EXISTS idx_epochs_one_active
    ON epochs(user_id) WHERE ended_at IS NULL;

CREATE TABLE IF NOT EXISTS meal_records (
    id             TEXT PRIMARY KEY,
    user_id        TEXT NOT NULL,
    epoch_id       TEXT NOT NULL,
    primary_label  TEXT NOT NULL,
    tags           TEXT NOT NULL DEFAULT '[]',
    ingredients    TEXT NOT NULL DEFAULT '[]',
    embedding      BLOB,
    created_at     TEXT NOT NULL,
    FOREIGN KEY (epoch_id) REFERENCES epochs(id)
);

CREATE INDEX IF NOT EXISTS idx_records_epoch
    ON meal_records(user_id, epoch_id, created_at);

CREATE TABLE IF NOT EXISTS artifacts (
    id            TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL,
    epoch_id      TEXT NOT NULL,
    record_id     TEXT NOT NULL UNIQUE,
    external_ref  TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    FOREIGN KEY (epoch_id) REFERENCES epochs(id),
    FOREIGN KEY (record_id) REFERENCES meal_records(id)
);

CREATE INDEX IF NOT EXISTS idx_artifacts_epoch
    ON artifacts(user_id, epoch_id, created_at);
";
