//! `sift rankings` - reference table tooling.
//!
//! `aggregate` merges three independent ranking sources into the
//! mean-rank world table the pipeline consumes; `region` annotates that
//! table with the Europe/Outside Europe column the eligibility gate
//! reads. Both are offline data-preparation steps, run rarely.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::services::eligibility::is_european_country;

/// One institution's ranks across the three sources.
#[derive(Debug, Default, Clone)]
struct MergedEntry {
    display_name: String,
    qs: Option<u32>,
    the: Option<u32>,
    arwu: Option<u32>,
}

impl MergedEntry {
    fn ranks(&self) -> Vec<u32> {
        [self.arwu, self.qs, self.the].into_iter().flatten().collect()
    }

    fn mean_rank(&self) -> f64 {
        let ranks = self.ranks();
        f64::from(ranks.iter().sum::<u32>()) / ranks.len() as f64
    }

    fn median_rank(&self) -> f64 {
        let mut ranks = self.ranks();
        ranks.sort_unstable();
        let mid = ranks.len() / 2;
        if ranks.len() % 2 == 0 {
            f64::from(ranks[mid - 1] + ranks[mid]) / 2.0
        } else {
            f64::from(ranks[mid])
        }
    }
}

pub fn aggregate(arwu: &str, qs: &str, the: &str, out: &str, json: bool) -> Result<()> {
    let mut merged: BTreeMap<String, MergedEntry> = BTreeMap::new();

    // Source precedence for display names: QS reads cleanest, then THE,
    // then ARWU; later loads only fill names still missing.
    for (path, slot) in [
        (arwu, RankSlot::Arwu),
        (the, RankSlot::The),
        (qs, RankSlot::Qs),
    ] {
        let entries = load_rank_source(path)
            .with_context(|| format!("failed to load ranking source {path}"))?;
        for (name, rank) in entries {
            let key = normalize_name(&name);
            if key.is_empty() {
                continue;
            }
            let entry = merged.entry(key).or_default();
            match slot {
                RankSlot::Arwu => entry.arwu = Some(rank),
                RankSlot::Qs => entry.qs = Some(rank),
                RankSlot::The => entry.the = Some(rank),
            }
            // QS and THE overwrite earlier display names; ARWU only seeds.
            if entry.display_name.is_empty() || !matches!(slot, RankSlot::Arwu) {
                entry.display_name = name;
            }
        }
    }

    let mut rows: Vec<MergedEntry> =
        merged.into_values().filter(|entry| !entry.ranks().is_empty()).collect();
    rows.sort_by(|a, b| a.mean_rank().total_cmp(&b.mean_rank()));

    let mut writer =
        csv::Writer::from_path(out).with_context(|| format!("cannot write {out}"))?;
    writer.write_record([
        "University Name",
        "QS Rank",
        "THE Rank",
        "ARWU Rank",
        "Mean Rank",
        "Median Rank",
        "Source Count",
    ])?;
    for row in &rows {
        writer.write_record([
            row.display_name.clone(),
            rank_cell(row.qs),
            rank_cell(row.the),
            rank_cell(row.arwu),
            format!("{:.2}", row.mean_rank()),
            format!("{}", row.median_rank()),
            row.ranks().len().to_string(),
        ])?;
    }
    writer.flush()?;

    if json {
        println!("{}", json!({ "institutions": rows.len(), "output": out }));
    } else {
        println!("wrote {} institution(s) to {out}", rows.len());
    }
    Ok(())
}

enum RankSlot {
    Arwu,
    Qs,
    The,
}

pub fn region(table: &str, locations: &str, out: &str, json: bool) -> Result<()> {
    // name -> country mapping.
    let mut countries: BTreeMap<String, String> = BTreeMap::new();
    let mut reader = csv::Reader::from_path(locations)
        .with_context(|| format!("cannot open locations file {locations}"))?;
    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, &["name", "institution", "institution name", "university name"]);
    let country_col = find_column(&headers, &["country", "location", "location full"]);
    let (Some(name_col), Some(country_col)) = (name_col, country_col) else {
        bail!("locations file {locations} needs name and country columns");
    };
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_col).unwrap_or_default().trim();
        let country = row.get(country_col).unwrap_or_default().trim();
        if !name.is_empty() && !country.is_empty() {
            countries.insert(normalize_name(name), country.to_string());
        }
    }

    let mut reader =
        csv::Reader::from_path(table).with_context(|| format!("cannot open world table {table}"))?;
    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, &["university name", "name"])
        .context("world table needs a University Name column")?;

    let mut out_headers: Vec<String> = headers.iter().map(ToString::to_string).collect();
    let region_col = out_headers.iter().position(|header| header.trim().eq_ignore_ascii_case("region"));
    if region_col.is_none() {
        out_headers.push("Region".to_string());
    }

    let mut writer = csv::Writer::from_path(out).with_context(|| format!("cannot write {out}"))?;
    writer.write_record(&out_headers)?;

    let mut unknown = 0_usize;
    let mut total = 0_usize;
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_col).unwrap_or_default();
        let region = countries
            .get(&normalize_name(name))
            .map_or("Unknown", |country| country_region(country));
        if region == "Unknown" {
            unknown += 1;
        }
        total += 1;

        let mut cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        cells.resize(headers.len(), String::new());
        match region_col {
            Some(col) => cells[col] = region.to_string(),
            None => cells.push(region.to_string()),
        }
        writer.write_record(&cells)?;
    }
    writer.flush()?;

    if json {
        println!("{}", json!({ "rows": total, "unknown_region": unknown, "output": out }));
    } else {
        println!("wrote {total} row(s) to {out} ({unknown} with unknown region)");
    }
    Ok(())
}

/// Region classification for a country string.
pub fn country_region(country: &str) -> &'static str {
    let country = country.trim();
    if country.is_empty() {
        return "Unknown";
    }
    let country = if country.eq_ignore_ascii_case("uk") { "United Kingdom" } else { country };
    if country.eq_ignore_ascii_case("usa") || country.eq_ignore_ascii_case("us") {
        return "Outside Europe";
    }
    if is_european_country(country) {
        "Europe"
    } else {
        "Outside Europe"
    }
}

/// Normalize institution names for cross-source joining: lowercase,
/// parenthesized qualifiers dropped, punctuation collapsed to spaces.
pub fn normalize_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut depth = 0_u32;
    for c in name.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => cleaned.push(c),
            _ => {}
        }
    }

    let lowered: String = cleaned
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First integer embedded in a rank string ("=12", "101-150", "Top 10").
pub fn clean_rank(rank: &str) -> Option<u32> {
    let digits: String = rank
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn load_rank_source(path: &str) -> Result<Vec<(String, u32)>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let name_col = find_column(&headers, &["name", "institution name", "university name", "institution"])
        .with_context(|| format!("{path}: no institution-name column found"))?;
    let rank_col = headers
        .iter()
        .position(|header| header.trim().to_lowercase().contains("rank"))
        .with_context(|| format!("{path}: no rank column found"))?;

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_col).unwrap_or_default().trim().to_string();
        let Some(rank) = clean_rank(row.get(rank_col).unwrap_or_default()) else { continue };
        if !name.is_empty() {
            entries.push((name, rank));
        }
    }
    Ok(entries)
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
}

fn rank_cell(rank: Option<u32>) -> String {
    rank.map(|rank| rank.to_string()).unwrap_or_default()
}
