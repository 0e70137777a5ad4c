//! Party clauses for meeting minutes
//!
//! One clause lists every attending member with their holding and votes, in
//! the order submitted. Any number of parties is supported; the template
//! decides how many it can lay out.

use shared_types::Party;

use crate::error::FormError;
use crate::numwords;

fn party_entry(position: u64, party: &Party, unit: &str, nominal_value: &str) -> Result<String, FormError> {
    Ok(format!(
        "{}) {}, por sus propios derechos, propietario de {} {} de USD ${} cada una, \
         pagadas en el 100.00% de su valor nominal y con derecho a {} voto(s)",
        numwords::to_words_standalone(position)?,
        party.name,
        party.shares,
        unit,
        nominal_value,
        party.votes()
    ))
}

/// Build the attendance clause
///
/// Entries are separated by `"; "`, the last one is introduced by `"; y "`,
/// and the clause ends with a period.
pub fn party_clause(parties: &[Party], unit: &str, nominal_value: &str) -> Result<String, FormError> {
    if parties.is_empty() {
        return Err(FormError::NoParties);
    }

    let entries = parties
        .iter()
        .enumerate()
        .map(|(i, party)| party_entry(i as u64 + 1, party, unit, nominal_value))
        .collect::<Result<Vec<_>, _>>()?;

    let clause = match entries.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{}; y {}", rest.join("; "), last),
        None => String::new(),
    };

    Ok(format!("{}.", clause))
}
