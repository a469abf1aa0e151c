//! The database's single row type and its fixed-width on-disk codec.
//!
//! A row is `(id: u32, username: up to 32 bytes, email: up to 255 bytes)`.
//! The tree treats the serialized row as an opaque 293-byte value; only
//! this module understands its internal structure.

use crate::error::StatementError;

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;

const ID_SIZE: usize = 4;
const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1; // NUL terminator
const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

const ID_OFFSET: usize = 0;
const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Size of the serialized row: `4 + 33 + 256 = 293` bytes.
pub const ROW_SIZE: usize = EMAIL_OFFSET + EMAIL_SIZE;

/// A single row in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Build a row from parsed statement fields, validating field lengths.
    pub fn new(id: u32, username: &str, email: &str) -> std::result::Result<Self, StatementError> {
        if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
            return Err(StatementError::StringTooLong);
        }
        Ok(Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
        })
    }

    /// Serialize this row into a fixed 293-byte buffer:
    /// `id` (4 bytes LE), NUL-terminated `username` padded to 33 bytes,
    /// NUL-terminated `email` padded to 256 bytes.
    pub fn serialize(&self) -> [u8; ROW_SIZE] {
        let mut buf = [0u8; ROW_SIZE];
        buf[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());

        let username_bytes = self.username.as_bytes();
        buf[USERNAME_OFFSET..USERNAME_OFFSET + username_bytes.len()]
            .copy_from_slice(username_bytes);
        // Remaining bytes in the field (including the terminator) stay zero.

        let email_bytes = self.email.as_bytes();
        buf[EMAIL_OFFSET..EMAIL_OFFSET + email_bytes.len()].copy_from_slice(email_bytes);

        buf
    }

    /// Deserialize a row from a 293-byte buffer written by `serialize`.
    pub fn deserialize(buf: &[u8; ROW_SIZE]) -> Self {
        let id = u32::from_le_bytes(buf[ID_OFFSET..ID_OFFSET + ID_SIZE].try_into().unwrap());
        let username = read_nul_terminated(&buf[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let email = read_nul_terminated(&buf[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
        Self { id, username, email }
    }
}

fn read_nul_terminated(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
