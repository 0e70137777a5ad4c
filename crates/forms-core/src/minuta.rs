//! Property sale agreement ("minuta de compraventa")

use docx_engine::{FillPlan, PartOp, PlaceholderTable, DOCUMENT_PART};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Alicuota, Submission};

use crate::error::FormError;
use crate::fields::{require, require_number};
use crate::money::MoneyAmount;

lazy_static! {
    /// Buyer paragraph of the template, from the buyer phrase to the end of
    /// the marital partnership wording
    static ref BUYER_PASSAGE: Regex = Regex::new(
        r"(?s)<w:t>los  cónyuges</w:t>.+?la  sociedad  conyugal  que  tienen  formada</w:t>"
    )
    .unwrap();
}

/// Run properties of the buyer paragraph, with `emphasis` after the font
fn run(emphasis: &str, text: &str) -> String {
    format!(
        "<w:r><w:rPr><w:rFonts w:ascii=\"Palatino Linotype\" w:eastAsia=\"Calibri\" \
         w:hAnsi=\"Palatino Linotype\" w:cs=\"Calibri\"/>{}<w:spacing w:val=\"20\"/>\
         <w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/><w:lang w:val=\"es-ES\" w:eastAsia=\"es-ES\"/>\
         </w:rPr><w:t xml:space=\"preserve\">{}</w:t>",
        emphasis, text
    )
}

/// Buyer paragraph naming both spouses in bold; the names are filled by
/// substitution
///
/// Closes the run holding the buyer phrase and leaves the last run open for
/// the template's own closing tag.
fn spouses_passage() -> String {
    const BOLD: &str = "<w:b/><w:bCs/>";
    [
        "<w:t>los  cónyuges</w:t></w:r>".to_string(),
        run("<w:b/>", " ") + "</w:r>",
        run(BOLD, "con1xx") + "</w:r>",
        run(BOLD, " y ") + "</w:r>",
        run(BOLD, "con2xx") + "</w:r>",
        run(
            "",
            "  por  sus  propios  y  personales  derechos  y  por  los  que  representan  \
             de  la  sociedad  conyugal  que  tienen  formada",
        ),
    ]
    .concat()
}

/// Who is buying the property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuyerType {
    /// A married couple buying for their marital partnership
    Spouses,
    /// Any other buyer description, as submitted
    Other(String),
}

impl BuyerType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "cónyuges" | "conyuges" => BuyerType::Spouses,
            _ => BuyerType::Other(raw.trim().to_string()),
        }
    }
}

/// A validated sale agreement submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinutaForm {
    pub alicuota: Alicuota,
    pub sale_price: MoneyAmount,
    pub down_payment: MoneyAmount,
    pub loan_amount: MoneyAmount,
    pub appraisal_price: MoneyAmount,
    pub buyer: BuyerType,
    pub first_buyer: String,
    pub second_buyer: Option<String>,
    pub lender: String,
}

impl MinutaForm {
    /// Id of the property record the submission refers to
    pub fn alicuota_id(submission: &Submission) -> Result<i64, FormError> {
        require_number(submission, "minutademo_alicuota")
    }

    pub fn from_submission(submission: &Submission, alicuota: Alicuota) -> Result<Self, FormError> {
        let amount = |field: &str| -> Result<MoneyAmount, FormError> {
            MoneyAmount::parse(require(submission, field)?)
        };

        let buyer = BuyerType::parse(require(submission, "minutademo_tipodecomprador")?);
        let second_buyer = match buyer {
            BuyerType::Spouses => Some(require(submission, "minutademo_conyuge2name")?.to_string()),
            BuyerType::Other(_) => submission.get("minutademo_conyuge2name").map(str::to_string),
        };

        Ok(Self {
            alicuota,
            sale_price: amount("minutademo_preciodecv")?,
            down_payment: amount("minutademo_montodp")?,
            loan_amount: amount("minutademo_montopres")?,
            appraisal_price: amount("minutademo_precioeb")?,
            first_buyer: require(submission, "minutademo_conyuge1name")?.to_string(),
            second_buyer,
            lender: require(submission, "minutademo_ifin")?.to_string(),
            buyer,
        })
    }

    pub fn document_table(&self) -> Result<PlaceholderTable, FormError> {
        let a = &self.alicuota;
        let mut table = PlaceholderTable::new();
        table
            .insert_text("con1xx", &self.first_buyer)
            .insert_text("con2xx", self.second_buyer.as_deref().unwrap_or_default())
            .insert_text("alicuotaxx", &a.alicuota)
            .insert_text("info1xx", &a.info1)
            .insert_text("info2xx", &a.info2)
            .insert_text("info3xx", &a.info3)
            .insert_text("info4xx", &a.info4)
            .insert_text("info5xx", &a.info5)
            .insert_text("preciodecvxx", self.sale_price.in_words()?)
            .insert_text("montodpxx", self.down_payment.in_words()?)
            .insert_text("montopresxx", self.loan_amount.in_words()?)
            .insert_text("precioebxx", self.appraisal_price.in_words()?)
            .insert_text("ifinxx", &self.lender);
        Ok(table)
    }

    /// Spouse buyers get their paragraph rewritten before substitution
    pub fn fill_plan(&self) -> Result<FillPlan, FormError> {
        let mut plan = FillPlan::new();
        if self.buyer == BuyerType::Spouses {
            plan.push(
                DOCUMENT_PART,
                PartOp::Rewrite {
                    pattern: BUYER_PASSAGE.clone(),
                    replacement: spouses_passage(),
                },
            );
        }
        plan.push(DOCUMENT_PART, PartOp::Substitute(self.document_table()?));
        Ok(plan)
    }
}
