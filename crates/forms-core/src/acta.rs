//! General meeting minutes ("acta de junta general")

use docx_engine::templates::TemplateInfo;
use docx_engine::{FillPlan, PartOp, PlaceholderTable, DOCUMENT_PART, HEADER_PART};
use shared_types::{ActaSummary, Party, Submission};
use tracing::debug;

use crate::clauses::party_clause;
use crate::company::CompanyType;
use crate::dates::CelebrationDate;
use crate::error::FormError;
use crate::fields::{require, require_number};
use crate::roster;

/// Party slots drawn in the template that may be removed when unused
const PARTY_MARKERS: [&str; 3] = ["nombre", "acciones", "votos"];

/// Attendance clause markers laid out in `modeloacta.docx`
///
/// The whole clause goes into the first one; the rest are cleared.
const CLAUSE_MARKERS: [&str; 6] = [
    "vara011",
    "vara01coma",
    "vara012",
    "vara021",
    "vara02coma",
    "vara022",
];

fn party_marker(slot: usize, field: &str) -> String {
    format!("acc{}{}", slot, field)
}

fn checked_total(mut values: impl Iterator<Item = u64>) -> Result<u64, FormError> {
    values.try_fold(0u64, |acc, v| acc.checked_add(v).ok_or(FormError::TotalOverflow))
}

/// A validated minutes submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActaForm {
    pub company_type: CompanyType,
    pub company_name: String,
    pub celebration: CelebrationDate,
    /// The date exactly as submitted, kept for the record
    pub celebration_raw: String,
    pub capital: String,
    pub nominal_value: String,
    pub parties: Vec<Party>,
    pub total_shares: u64,
    pub total_votes: u64,
}

impl ActaForm {
    /// Read and validate a submission for a template with `max_parties` slots
    pub fn from_submission(submission: &Submission, max_parties: usize) -> Result<Self, FormError> {
        let company_type: CompanyType = require(submission, "ciatype")?.parse()?;
        let company_name = require(submission, "actademo_cianombre")?.to_string();
        let celebration_raw = require(submission, "actademo_chosendate")?.to_string();
        let celebration = CelebrationDate::parse(&celebration_raw)?;
        let capital = require(submission, "actademo_capital")?.to_string();

        let nominal_value = require(submission, "actademo_valnominal")?.to_string();
        if nominal_value.parse::<f64>().map_or(true, |v| !v.is_finite() || v < 0.0) {
            return Err(FormError::InvalidNumber {
                field: "actademo_valnominal".to_string(),
                value: nominal_value,
            });
        }

        let count: usize = require_number(submission, "accnumber")?;
        if count == 0 || count > max_parties {
            return Err(FormError::PartyCount {
                count,
                max: max_parties,
            });
        }

        let parties = (1..=count)
            .map(|slot| -> Result<Party, FormError> {
                let name = require(submission, &format!("actademo_acc{}nombre", slot))?;
                let shares = require_number(submission, &format!("actademo_acc{}acciones", slot))?;
                Ok(Party::new(name, shares))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_shares = checked_total(parties.iter().map(|p| p.shares))?;
        let total_votes = checked_total(parties.iter().map(Party::votes))?;

        Ok(Self {
            company_type,
            company_name,
            celebration,
            celebration_raw,
            capital,
            nominal_value,
            parties,
            total_shares,
            total_votes,
        })
    }

    /// Markers for the document body
    pub fn document_table(&self) -> Result<PlaceholderTable, FormError> {
        let ct = self.company_type;
        let clause = party_clause(&self.parties, ct.holding_unit(), &self.nominal_value)?;

        let mut table = PlaceholderTable::new();
        table.insert_text(CLAUSE_MARKERS[0], clause);
        for marker in &CLAUSE_MARKERS[1..] {
            table.insert_text(*marker, "");
        }
        table
            .insert_text("cianombre", &self.company_name)
            .insert_text("hora1x", self.celebration.time())
            .insert_text("acctype", ct.members())
            .insert_text("accxtypemay", ct.members_title())
            .insert_text("partcaptype", ct.holding_unit())
            .insert_text("añoanterior1", self.celebration.previous_year().to_string())
            .insert_text("currentyear1", self.celebration.year().to_string())
            .insert_text("totalaccionesxx", self.total_shares.to_string())
            .insert_text("totalvotosxx", self.total_votes.to_string())
            .insert_text("capitalvarxx", &self.capital)
            .insert_text("valnominalxx", &self.nominal_value);

        for (i, party) in self.parties.iter().enumerate() {
            let slot = i + 1;
            table
                .insert_text(party_marker(slot, "nombre"), &party.name)
                .insert_text(party_marker(slot, "acciones"), party.shares.to_string())
                .insert_text(party_marker(slot, "votos"), party.votes().to_string());
        }

        Ok(table)
    }

    /// Markers for the page header
    pub fn header_table(&self) -> PlaceholderTable {
        let mut table = PlaceholderTable::new();
        table
            .insert_text("fechaheader", self.celebration.long_date())
            .insert_text("cianombre", &self.company_name)
            .insert_text("accxtypemay", self.company_type.members_title());
        table
    }

    /// Full plan: drop unused party rows, then substitute body and header
    pub fn fill_plan(&self, template: &TemplateInfo) -> Result<FillPlan, FormError> {
        let slots = template.max_parties.unwrap_or(self.parties.len());
        let mut plan = FillPlan::new();

        for slot in (self.parties.len() + 1)..=slots {
            for field in PARTY_MARKERS {
                let marker = party_marker(slot, field);
                plan.push(DOCUMENT_PART, PartOp::drop_element("w:tr", marker.clone()))
                    .push(DOCUMENT_PART, PartOp::drop_element("w:p", marker));
            }
        }
        debug!(
            "Acta plan: {} of {} party slot(s) used",
            self.parties.len(),
            slots
        );

        plan.push(DOCUMENT_PART, PartOp::Substitute(self.document_table()?))
            .push(HEADER_PART, PartOp::Substitute(self.header_table()));

        Ok(plan)
    }

    /// Record of this submission, stamped with `makedate`
    pub fn summary(&self, makedate: String) -> ActaSummary {
        ActaSummary {
            makedate,
            cianame: self.company_name.clone(),
            ciatype: self.company_type.to_string(),
            celebdate: self.celebration_raw.clone(),
            accnumber: self.parties.len() as i64,
            accdata: roster::encode(&self.parties),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_engine::templates::{get_template, ACTA_TEMPLATE};
    use pretty_assertions::assert_eq;

    fn submission(count: usize) -> Submission {
        let mut s = Submission::from_pairs([
            ("ciatype", "S.A."),
            ("actademo_cianombre", "Pérez & Hijos S.A."),
            ("actademo_chosendate", "05/03/2024   10:00"),
            ("actademo_capital", "800.00"),
            ("actademo_valnominal", "1.00"),
        ]);
        s.insert("accnumber", count.to_string());
        for slot in 1..=count {
            s.insert(format!("actademo_acc{}nombre", slot), format!("Socio {}", slot));
            s.insert(format!("actademo_acc{}acciones", slot), (slot * 100).to_string());
        }
        s
    }

    #[test]
    fn test_from_submission() {
        let form = ActaForm::from_submission(&submission(2), 3).unwrap();
        assert_eq!(form.company_type, CompanyType::SociedadAnonima);
        assert_eq!(form.parties, vec![Party::new("Socio 1", 100), Party::new("Socio 2", 200)]);
        assert_eq!(form.total_shares, 300);
        assert_eq!(form.total_votes, 300);
    }

    #[test]
    fn test_party_count_out_of_range() {
        assert_eq!(
            ActaForm::from_submission(&submission(4), 3).unwrap_err(),
            FormError::PartyCount { count: 4, max: 3 }
        );
        let mut zero = submission(1);
        zero.insert("accnumber", "0");
        assert!(matches!(
            ActaForm::from_submission(&zero, 3),
            Err(FormError::PartyCount { count: 0, .. })
        ));
    }

    #[test]
    fn test_missing_party_field() {
        let mut s = submission(2);
        s.insert("actademo_acc2acciones", "");
        assert_eq!(
            ActaForm::from_submission(&s, 3).unwrap_err(),
            FormError::MissingField("actademo_acc2acciones".into())
        );
    }

    #[test]
    fn test_invalid_shares_and_nominal_value() {
        let mut s = submission(1);
        s.insert("actademo_acc1acciones", "cien");
        assert!(matches!(
            ActaForm::from_submission(&s, 3),
            Err(FormError::InvalidNumber { ref field, .. }) if field == "actademo_acc1acciones"
        ));

        let mut s = submission(1);
        s.insert("actademo_valnominal", "uno");
        assert!(matches!(
            ActaForm::from_submission(&s, 3),
            Err(FormError::InvalidNumber { ref field, .. }) if field == "actademo_valnominal"
        ));
    }

    #[test]
    fn test_document_table_values() {
        let form = ActaForm::from_submission(&submission(1), 3).unwrap();
        let table = form.document_table().unwrap();

        assert_eq!(table.get("cianombre"), Some("Pérez &amp; Hijos S.A."));
        assert_eq!(table.get("hora1x"), Some("10:00"));
        assert_eq!(table.get("añoanterior1"), Some("2023"));
        assert_eq!(table.get("currentyear1"), Some("2024"));
        assert_eq!(table.get("acctype"), Some("accionistas"));
        assert_eq!(table.get("totalvotosxx"), Some("100"));
        assert_eq!(table.get("acc1votos"), Some("100"));
        assert!(table.get("acc2nombre").is_none());
        assert!(table.get("vara011").unwrap().starts_with("UNO) Socio 1,"));
    }

    #[test]
    fn test_clause_markers_are_all_filled() {
        let form = ActaForm::from_submission(&submission(2), 3).unwrap();
        let table = form.document_table().unwrap();
        let filled = table
            .apply("<w:t>vara011vara01comavara012 vara021vara02comavara022</w:t>")
            .unwrap();

        assert!(filled.starts_with("<w:t>UNO) Socio 1,"));
        assert!(filled.contains("; y DOS) Socio 2,"));
        assert!(filled.ends_with("200 voto(s). </w:t>"));
        assert!(table.unreplaced(&filled).is_empty());
    }

    #[test]
    fn test_share_total_overflow_is_rejected() {
        let mut s = submission(2);
        s.insert("actademo_acc1acciones", u64::MAX.to_string());
        s.insert("actademo_acc2acciones", "1");
        assert_eq!(
            ActaForm::from_submission(&s, 3).unwrap_err(),
            FormError::TotalOverflow
        );

        s.insert("actademo_acc2acciones", "0");
        let form = ActaForm::from_submission(&s, 3).unwrap();
        assert_eq!(form.total_shares, u64::MAX);
    }

    #[test]
    fn test_header_table_values() {
        let mut s = submission(1);
        s.insert("ciatype", "LTDA");
        let form = ActaForm::from_submission(&s, 3).unwrap();
        let table = form.header_table();
        assert_eq!(table.get("fechaheader"), Some("05 de marzo de 2024"));
        assert_eq!(table.get("accxtypemay"), Some("Socios"));
    }

    #[test]
    fn test_fill_plan_drops_unused_slots() {
        let template = get_template(ACTA_TEMPLATE).unwrap();
        let form = ActaForm::from_submission(&submission(1), 3).unwrap();
        let plan = form.fill_plan(&template).unwrap();

        let document = plan.edit_for(DOCUMENT_PART).unwrap();
        let drops: Vec<&str> = document
            .ops
            .iter()
            .filter_map(|op| match op {
                PartOp::DropElement { containing, .. } => Some(containing.as_str()),
                _ => None,
            })
            .collect();

        assert!(drops.contains(&"acc2nombre"));
        assert!(drops.contains(&"acc3votos"));
        assert!(!drops.iter().any(|m| m.starts_with("acc1")));
        assert!(matches!(document.ops.last(), Some(PartOp::Substitute(_))));
        assert!(plan.table_for(HEADER_PART).is_some());
    }

    #[test]
    fn test_full_house_drops_nothing() {
        let template = get_template(ACTA_TEMPLATE).unwrap();
        let form = ActaForm::from_submission(&submission(3), 3).unwrap();
        let plan = form.fill_plan(&template).unwrap();
        assert_eq!(plan.edit_for(DOCUMENT_PART).unwrap().ops.len(), 1);
    }

    #[test]
    fn test_summary() {
        let form = ActaForm::from_submission(&submission(2), 3).unwrap();
        let summary = form.summary("2024-03-05 10:00:00".to_string());
        assert_eq!(summary.cianame, "Pérez & Hijos S.A.");
        assert_eq!(summary.ciatype, "S.A.");
        assert_eq!(summary.celebdate, "05/03/2024   10:00");
        assert_eq!(summary.accnumber, 2);
        assert_eq!(summary.accdata, "Socio 1,100;Socio 2,200");
    }
}
