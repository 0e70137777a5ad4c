//! Company types and the vocabulary each one uses

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompanyType {
    /// Sociedad anónima: capital in shares, members are shareholders
    #[serde(rename = "S.A.")]
    SociedadAnonima,
    /// Compañía limitada: capital in participations, members are partners
    #[serde(rename = "LTDA")]
    Limitada,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::SociedadAnonima => "S.A.",
            CompanyType::Limitada => "LTDA",
        }
    }

    /// Members in running text
    pub fn members(&self) -> &'static str {
        match self {
            CompanyType::SociedadAnonima => "accionistas",
            CompanyType::Limitada => "socios",
        }
    }

    /// Members in titles and headings
    pub fn members_title(&self) -> &'static str {
        match self {
            CompanyType::SociedadAnonima => "Accionistas",
            CompanyType::Limitada => "Socios",
        }
    }

    /// Unit of capital held by a member
    pub fn holding_unit(&self) -> &'static str {
        match self {
            CompanyType::SociedadAnonima => "acción(es)",
            CompanyType::Limitada => "participación(es)",
        }
    }
}

impl FromStr for CompanyType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "S.A." => Ok(CompanyType::SociedadAnonima),
            "LTDA" => Ok(CompanyType::Limitada),
            other => Err(FormError::UnsupportedCompanyType(other.to_string())),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
