//! 콘솔 표 출력
//!
//! 고정 폭 표로 행을 출력합니다. 숫자 컬럼(`matches`)은 오른쪽 정렬입니다.

use std::io::{self, Write};

use callaudit_core::types::{ColumnKey, ColumnSpec, ReportRow};

/// 행 목록을 표로 출력합니다.
///
/// 헤더, 구분선, 데이터 행, `N row(s)` 요약 줄 순서로 기록합니다.
/// 행이 없어도 헤더와 `0 row(s)`는 출력됩니다.
pub fn render_table(
    rows: &[ReportRow],
    columns: &[ColumnSpec],
    w: &mut dyn Write,
) -> io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.value(c.key).into_owned())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(col.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
    write_line(w, columns, &widths, &header)?;

    let rule: Vec<String> = widths.iter().map(|&n| "-".repeat(n)).collect();
    writeln!(w, "{}", rule.join("  "))?;

    for row in &cells {
        write_line(w, columns, &widths, row)?;
    }

    writeln!(w, "{} row(s)", rows.len())
}

fn write_line(
    w: &mut dyn Write,
    columns: &[ColumnSpec],
    widths: &[usize],
    values: &[String],
) -> io::Result<()> {
    let padded: Vec<String> = columns
        .iter()
        .zip(widths)
        .zip(values)
        .map(|((col, &width), value)| {
            if col.key == ColumnKey::Matches {
                format!("{value:>width$}")
            } else {
                format!("{value:<width$}")
            }
        })
        .collect();
    writeln!(w, "{}", padded.join("  ").trim_end())
}
