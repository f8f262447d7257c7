use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::application::errors::StorageError;
use crate::domain::entities::{
    Alert, Appointment, Organization, Reminder, ResourceEntry, ResourceKind, TipFrequency,
    Volunteer, VolunteerPost,
};
use crate::domain::traits::Store;

/// SQLite-backed store for everything the SMS, USSD and dashboard channels persist
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        init_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }
}

fn init_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone TEXT NOT NULL,
            title TEXT NOT NULL,
            kind TEXT NOT NULL,
            time TEXT,
            days TEXT NOT NULL DEFAULT '[]',
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tip_subscriptions (
            phone TEXT PRIMARY KEY,
            frequency TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS resources (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            phone TEXT NOT NULL,
            resource TEXT NOT NULL,
            location TEXT NOT NULL,
            open INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone TEXT NOT NULL,
            kind TEXT NOT NULL,
            location TEXT NOT NULL,
            details TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS alert_subscriptions (
            phone TEXT NOT NULL,
            location TEXT NOT NULL,
            PRIMARY KEY (phone, location)
        );

        CREATE TABLE IF NOT EXISTS volunteers (
            phone TEXT PRIMARY KEY,
            name TEXT,
            skills TEXT,
            location TEXT,
            availability TEXT
        );

        CREATE TABLE IF NOT EXISTS organizations (
            phone TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS volunteer_posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            organization_phone TEXT NOT NULL,
            organization TEXT NOT NULL,
            need TEXT NOT NULL,
            location TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            open INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS appointments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone TEXT NOT NULL,
            facility TEXT NOT NULL,
            service TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS group_members (
            group_name TEXT NOT NULL,
            member TEXT NOT NULL,
            joined_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (group_name, member)
        );

        CREATE TABLE IF NOT EXISTS group_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_name TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_phone ON reminders(phone);
        CREATE INDEX IF NOT EXISTS idx_resources_lookup ON resources(kind, location, open);
        CREATE INDEX IF NOT EXISTS idx_posts_location ON volunteer_posts(location, open);",
    )
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn reminder_from_row(row: &Row<'_>) -> rusqlite::Result<Reminder> {
    let days: String = row.get(5)?;
    let days = serde_json::from_str(&days).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Reminder {
        id: row.get(0)?,
        phone: row.get(1)?,
        title: row.get(2)?,
        kind: row.get(3)?,
        time: row.get(4)?,
        days,
        active: row.get(6)?,
        created_at: timestamp(row, 7)?,
    })
}

fn resource_from_row(row: &Row<'_>) -> rusqlite::Result<ResourceEntry> {
    let kind: String = row.get(1)?;
    Ok(ResourceEntry {
        id: row.get(0)?,
        kind: ResourceKind::parse(&kind).unwrap_or(ResourceKind::Request),
        phone: row.get(2)?,
        resource: row.get(3)?,
        location: row.get(4)?,
        open: row.get(5)?,
        created_at: timestamp(row, 6)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<VolunteerPost> {
    Ok(VolunteerPost {
        id: row.get(0)?,
        organization_phone: row.get(1)?,
        organization: row.get(2)?,
        need: row.get(3)?,
        location: row.get(4)?,
        details: row.get(5)?,
        open: row.get(6)?,
    })
}

fn days_json(days: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(days).map_err(|e| StorageError::Serialization(e.to_string()))
}

const RESOURCE_COLUMNS: &str = "id, kind, phone, resource, location, open, created_at";

#[async_trait]
impl Store for SqliteStore {
    async fn save_reminder(&self, reminder: &Reminder) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO reminders (phone, title, kind, time, days, active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                reminder.phone,
                reminder.title,
                reminder.kind,
                reminder.time,
                days_json(&reminder.days)?,
                reminder.active,
                reminder.created_at.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn update_reminder(&self, reminder: &Reminder) -> Result<bool, StorageError> {
        let rows = self.conn()?.execute(
            "UPDATE reminders SET title = ?1, kind = ?2, time = ?3, days = ?4, active = ?5
             WHERE id = ?6 AND phone = ?7",
            params![
                reminder.title,
                reminder.kind,
                reminder.time,
                days_json(&reminder.days)?,
                reminder.active,
                reminder.id,
                reminder.phone,
            ],
        )?;
        Ok(rows > 0)
    }

    async fn delete_reminder(&self, phone: &str, id: i64) -> Result<bool, StorageError> {
        let rows = self.conn()?.execute(
            "DELETE FROM reminders WHERE id = ?1 AND phone = ?2",
            params![id, phone],
        )?;
        Ok(rows > 0)
    }

    async fn list_reminders(&self, phone: &str) -> Result<Vec<Reminder>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, phone, title, kind, time, days, active, created_at
             FROM reminders WHERE phone = ?1 ORDER BY id",
        )?;
        let reminders = stmt
            .query_map([phone], reminder_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reminders)
    }

    async fn set_tip_subscription(
        &self,
        phone: &str,
        frequency: Option<TipFrequency>,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        match frequency {
            Some(frequency) => conn.execute(
                "INSERT OR REPLACE INTO tip_subscriptions (phone, frequency) VALUES (?1, ?2)",
                params![phone, frequency.as_str()],
            )?,
            None => conn.execute("DELETE FROM tip_subscriptions WHERE phone = ?1", [phone])?,
        };
        Ok(())
    }

    async fn tip_subscription(&self, phone: &str) -> Result<Option<TipFrequency>, StorageError> {
        let frequency: Option<String> = self
            .conn()?
            .query_row(
                "SELECT frequency FROM tip_subscriptions WHERE phone = ?1",
                [phone],
                |row| row.get(0),
            )
            .optional()?;
        Ok(frequency.as_deref().and_then(TipFrequency::parse))
    }

    async fn save_resource(&self, entry: &ResourceEntry) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO resources (kind, phone, resource, location, open, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.kind.as_str(),
                entry.phone,
                entry.resource,
                entry.location,
                entry.open,
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn resources_by_phone(
        &self,
        kind: ResourceKind,
        phone: &str,
    ) -> Result<Vec<ResourceEntry>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM resources WHERE kind = ?1 AND phone = ?2 ORDER BY id",
            RESOURCE_COLUMNS
        ))?;
        let entries = stmt
            .query_map(params![kind.as_str(), phone], resource_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    async fn find_resources(
        &self,
        kind: ResourceKind,
        resource: Option<&str>,
        location: &str,
    ) -> Result<Vec<ResourceEntry>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM resources
             WHERE kind = ?1 AND location = ?2 AND open = 1
               AND (?3 IS NULL OR resource = ?3)
             ORDER BY id",
            RESOURCE_COLUMNS
        ))?;
        let entries = stmt
            .query_map(params![kind.as_str(), location, resource], resource_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    async fn save_alert(&self, alert: &Alert) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO alerts (phone, kind, location, details, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                alert.phone,
                alert.kind,
                alert.location,
                alert.details,
                alert.created_at.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn set_alert_subscription(
        &self,
        phone: &str,
        location: &str,
        subscribed: bool,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        if subscribed {
            conn.execute(
                "INSERT OR IGNORE INTO alert_subscriptions (phone, location) VALUES (?1, ?2)",
                params![phone, location],
            )?;
        } else {
            conn.execute(
                "DELETE FROM alert_subscriptions WHERE phone = ?1 AND location = ?2",
                params![phone, location],
            )?;
        }
        Ok(())
    }

    async fn alert_subscribers(&self, location: &str) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT phone FROM alert_subscriptions WHERE location = ?1 ORDER BY rowid",
        )?;
        let phones = stmt
            .query_map([location], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(phones)
    }

    async fn save_volunteer(&self, volunteer: &Volunteer) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT INTO volunteers (phone, name, skills, location, availability)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(phone) DO UPDATE SET
                name = COALESCE(excluded.name, name),
                skills = COALESCE(excluded.skills, skills),
                location = COALESCE(excluded.location, location),
                availability = COALESCE(excluded.availability, availability)",
            params![
                volunteer.phone,
                volunteer.name,
                volunteer.skills,
                volunteer.location,
                volunteer.availability,
            ],
        )?;
        Ok(())
    }

    async fn volunteer(&self, phone: &str) -> Result<Option<Volunteer>, StorageError> {
        let volunteer = self
            .conn()?
            .query_row(
                "SELECT phone, name, skills, location, availability FROM volunteers WHERE phone = ?1",
                [phone],
                |row| {
                    Ok(Volunteer {
                        phone: row.get(0)?,
                        name: row.get(1)?,
                        skills: row.get(2)?,
                        location: row.get(3)?,
                        availability: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(volunteer)
    }

    async fn save_organization(&self, organization: &Organization) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO organizations (phone, name) VALUES (?1, ?2)",
            params![organization.phone, organization.name],
        )?;
        Ok(())
    }

    async fn organization(&self, phone: &str) -> Result<Option<Organization>, StorageError> {
        let organization = self
            .conn()?
            .query_row(
                "SELECT phone, name FROM organizations WHERE phone = ?1",
                [phone],
                |row| {
                    Ok(Organization {
                        phone: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(organization)
    }

    async fn save_post(&self, post: &VolunteerPost) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO volunteer_posts (organization_phone, organization, need, location, details, open)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                post.organization_phone,
                post.organization,
                post.need,
                post.location,
                post.details,
                post.open
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn update_post(&self, id: i64, phone: &str, update: &str) -> Result<bool, StorageError> {
        let rows = self.conn()?.execute(
            "UPDATE volunteer_posts
             SET details = CASE WHEN details = '' THEN ?3 ELSE details || ' | ' || ?3 END
             WHERE id = ?1 AND organization_phone = ?2",
            params![id, phone, update],
        )?;
        Ok(rows > 0)
    }

    async fn close_post(&self, id: i64, phone: &str) -> Result<bool, StorageError> {
        let rows = self.conn()?.execute(
            "UPDATE volunteer_posts SET open = 0 WHERE id = ?1 AND organization_phone = ?2",
            params![id, phone],
        )?;
        Ok(rows > 0)
    }

    async fn open_posts(&self, location: &str) -> Result<Vec<VolunteerPost>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, organization_phone, organization, need, location, details, open
             FROM volunteer_posts WHERE location = ?1 AND open = 1 ORDER BY id",
        )?;
        let posts = stmt
            .query_map([location], post_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    async fn save_appointment(&self, appointment: &Appointment) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO appointments (phone, facility, service, date, time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                appointment.phone,
                appointment.facility,
                appointment.service,
                appointment.date,
                appointment.time,
                appointment.created_at.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn join_group(&self, group: &str, member: &str) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT OR IGNORE INTO group_members (group_name, member) VALUES (?1, ?2)",
            params![group, member],
        )?;
        Ok(())
    }

    async fn save_group_message(&self, group: &str, message: &str) -> Result<(), StorageError> {
        self.conn()?.execute(
            "INSERT INTO group_messages (group_name, message) VALUES (?1, ?2)",
            params![group, message],
        )?;
        Ok(())
    }
}
