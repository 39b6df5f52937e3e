#![allow(dead_code)]

use super::mysql_conn;
use mysql_async::{Row, prelude::*};

/// SQL tuple for the citizen with the given id.
pub fn citizen_values(id: u32) -> String {
    let balance = if id % 7 == 0 {
        "NULL".to_string()
    } else {
        format!("{}.{:02}", id * 13, id % 100)
    };
    format!(
        "({id}, 'Citizen {id}', {balance}, DATE_ADD('1980-01-01', INTERVAL {id} DAY), \
         '2024-03-01 08:15:30.{micros:06}', '-{hours}:05:00', '{{\"rt\": {rt}}}', UNHEX('{hex:08X}'))",
        micros = id * 11,
        hours = id % 48,
        rt = id % 20,
        hex = id,
    )
}

pub async fn execute(url: &str, sql: &str) {
    let mut conn = mysql_conn(url).await;
    conn.query_drop(sql).await.expect("execute statement");
    conn.disconnect().await.expect("disconnect");
}

pub async fn get_row_count(url: &str, table: &str) -> u64 {
    let mut conn = mysql_conn(url).await;
    let count: Option<u64> = conn
        .query_first(format!("SELECT COUNT(*) FROM `{table}`"))
        .await
        .expect("count rows");
    conn.disconnect().await.expect("disconnect");
    count.unwrap_or_default()
}

pub async fn assert_row_count(url: &str, table: &str, expected: u64) {
    let count = get_row_count(url, table).await;
    assert_eq!(count, expected, "row count mismatch for table '{table}'");
}

/// Rows of `table` in primary key order, every column cast to text.
pub async fn fetch_rows_as_text(url: &str, table: &str) -> Vec<Vec<Option<String>>> {
    let mut conn = mysql_conn(url).await;
    let rows: Vec<Row> = conn
        .query(format!(
            "SELECT CAST(nik AS CHAR), full_name, CAST(balance AS CHAR), \
             CAST(birth_date AS CHAR), CAST(updated_at AS CHAR), CAST(wake_time AS CHAR), \
             CAST(attributes AS CHAR), HEX(photo) FROM `{table}` ORDER BY nik"
        ))
        .await
        .expect("fetch rows");
    conn.disconnect().await.expect("disconnect");

    rows.into_iter()
        .map(|row| {
            (0..row.len())
                .map(|idx| row.get::<Option<String>, _>(idx).flatten())
                .collect()
        })
        .collect()
}
