//! v001 -- Initial schema creation.
//!
//! Creates the three tables: `mask`, `dialogue` and `message`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Masks (personas)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS mask (
    mask_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    mask_name     VARCHAR(50) NOT NULL UNIQUE,
    mask_describe VARCHAR(500)
);

-- ----------------------------------------------------------------
-- Dialogues
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS dialogue (
    dialogue_name VARCHAR(50) PRIMARY KEY NOT NULL,
    mask_id       INTEGER,                       -- nullable FK -> mask(mask_id)

    FOREIGN KEY (mask_id) REFERENCES mask(mask_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_dialogue_mask_id ON dialogue(mask_id);

-- ----------------------------------------------------------------
-- Messages
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS message (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    sender        TEXT NOT NULL CHECK (sender IN ('USER', 'GPT')),
    send_time     TEXT NOT NULL,                 -- RFC-3339
    send_type     TEXT NOT NULL CHECK (send_type IN ('TEXT', 'IMAGE', 'AUDIO')),
    send_info     VARCHAR(2000) NOT NULL,
    send_succeed  INTEGER NOT NULL,              -- boolean 0/1
    dialogue_name VARCHAR(50) NOT NULL,          -- FK -> dialogue(dialogue_name)

    FOREIGN KEY (dialogue_name) REFERENCES dialogue(dialogue_name)
);

CREATE INDEX IF NOT EXISTS idx_message_dialogue_id ON message(dialogue_name, id);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
