//! Plain-text summary table of geocoded rows

use butterfly_visit::GeocodedRow;

const HEADERS: [&str; 4] = ["Owner", "Address", "Latitude", "Longitude"];

/// Render one line per row: owner, address and coordinates (`-` when unlocated)
pub fn render_summary(rows: &[GeocodedRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            let (lat, lon) = match r.point().coordinate {
                Some(c) => (format!("{:.6}", c.lat), format!("{:.6}", c.lon)),
                None => ("-".to_string(), "-".to_string()),
            };
            [r.row.owner.clone(), r.row.address.clone(), lat, lon]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use butterfly_visit::{GeocodeOutcome, SheetRow};

    fn row(address: &str, outcome: GeocodeOutcome) -> GeocodedRow {
        GeocodedRow {
            row: SheetRow {
                line: 2,
                owner: "Ana".to_string(),
                address: address.to_string(),
            },
            outcome,
        }
    }

    #[test]
    fn test_render_summary() {
        let rows = vec![
            row(
                "Rua São João",
                GeocodeOutcome::Resolved {
                    label: "Rua São João, Curitiba".to_string(),
                    lat: -25.5,
                    lon: -49.25,
                },
            ),
            row("Rua B", GeocodeOutcome::unresolved("address not found")),
        ];

        let table = render_summary(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Owner  Address       Latitude    Longitude");
        assert_eq!(lines[1], "Ana    Rua São João  -25.500000  -49.250000");
        assert_eq!(lines[2], "Ana    Rua B         -           -");
    }
}
