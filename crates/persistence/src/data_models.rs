// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::kv_entries;
use diesel::prelude::*;

/// Diesel row for inserting or replacing a key-value entry.
#[derive(Debug, Insertable)]
#[diesel(table_name = kv_entries)]
pub struct NewKvEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    /// RFC 3339 timestamp of the write.
    pub updated_at: &'a str,
}
