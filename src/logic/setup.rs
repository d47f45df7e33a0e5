//! Setup phase: turn entered team names (or a CSV upload) into the seeded team list.

use crate::models::{BracketError, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Read;

/// Number teams `team-1..team-N` in entry order. Names are trimmed; validation
/// (empty or duplicate names) happens when the bracket is built.
pub fn teams_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Team> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Team::new(format!("team-{}", i + 1), name.as_ref().trim()))
        .collect()
}

/// Read team names from CSV: the first column of each row is a name.
/// Blank rows are skipped, as is a leading `name` header.
pub fn teams_from_csv<R: Read>(reader: R) -> Result<Vec<Team>, BracketError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut names = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| BracketError::Import(e.to_string()))?;
        let name = record.get(0).unwrap_or("");
        if name.is_empty() || (i == 0 && name.eq_ignore_ascii_case("name")) {
            continue;
        }
        names.push(name.to_string());
    }
    log::debug!("Imported {} team names from CSV", names.len());
    Ok(teams_from_names(&names))
}

/// Shuffle the seeding order. Team ids keep their numbering; only bracket positions change.
pub fn shuffle_teams<R: Rng + ?Sized>(teams: &mut [Team], rng: &mut R) {
    teams.shuffle(rng);
}
