//! Dossier module - the due-diligence input consumed by the scoring engine
//!
//! Dossiers are assembled by external collaborators (registry lookups, mock
//! generators) and arrive as JSON. Every section is optional; an absent
//! section carries no weight in the final score.

use serde::{Deserialize, Serialize};

/// Structured due-diligence dossier about an individual or organization
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceDossier {
    /// Identifier the dossier was assembled for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Registration data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationData>,

    /// Shareholder list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<Ownership>,

    /// Equity participations in other entities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participations: Option<Participations>,

    /// Political exposure checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub political_exposure: Option<PoliticalExposure>,

    /// National and international sanction lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanctions: Option<Sanctions>,

    /// Court proceedings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judicial_processes: Option<JudicialProcesses>,

    /// Administrative proceedings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_processes: Option<AdministrativeProcesses>,
}

impl ComplianceDossier {
    /// Whether no section is present
    pub fn is_empty(&self) -> bool {
        self.registration.is_none()
            && self.ownership.is_none()
            && self.participations.is_none()
            && self.political_exposure.is_none()
            && self.sanctions.is_none()
            && self.judicial_processes.is_none()
            && self.administrative_processes.is_none()
    }
}

/// Whether a free-form situation label means "active"
fn is_active_label(label: &str) -> bool {
    matches!(
        label.trim().to_lowercase().as_str(),
        "active" | "ativa" | "ativo"
    )
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration data of the subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    /// Legal or personal name
    #[serde(default)]
    pub name: String,

    /// Registration status
    pub status: RegistrationStatus,
}

/// Registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Regular registration
    #[serde(alias = "Active", alias = "Ativo", alias = "ativo")]
    Active,
    /// Inactive registration
    #[serde(alias = "Inactive", alias = "Inativo", alias = "inativo")]
    Inactive,
    /// Suspended registration
    #[serde(alias = "Suspended", alias = "Suspenso", alias = "suspenso")]
    Suspended,
    /// Closed / deregistered
    #[serde(alias = "Closed", alias = "Baixado", alias = "baixado")]
    Closed,
}

// ---------------------------------------------------------------------------
// Ownership and participations
// ---------------------------------------------------------------------------

/// Shareholder list of an organization
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ownership {
    /// Partners and shareholders
    pub shareholders: Vec<Shareholder>,
}

/// A single partner or shareholder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shareholder {
    /// Name
    pub name: String,
    /// Identifier of the shareholder
    pub document: String,
    /// Role in the company
    pub role: String,
    /// Stake in percent
    pub stake_percent: f64,
}

/// Equity participations of the subject in other entities
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participations {
    /// Related entities
    pub entities: Vec<RelatedEntity>,
}

/// An entity the subject holds a stake in
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedEntity {
    /// Legal name
    pub name: String,
    /// Organization identifier
    pub document: String,
    /// Stake in percent
    pub stake_percent: f64,
    /// Registry situation, free-form (`Active`, `Inactive`, ...)
    pub situation: String,
}

impl RelatedEntity {
    /// Whether the entity is in active situation
    pub fn is_active(&self) -> bool {
        is_active_label(&self.situation)
    }
}

// ---------------------------------------------------------------------------
// Political exposure
// ---------------------------------------------------------------------------

/// Politically exposed person checks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoliticalExposure {
    /// The subject is directly politically exposed
    #[serde(alias = "isPEP")]
    pub is_pep: bool,

    /// The subject is related to an exposed person
    #[serde(alias = "relacionamentoPEP")]
    pub related_to_pep: bool,

    /// Exposure records
    pub details: Vec<PepDetail>,
}

/// A single exposure record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PepDetail {
    /// Name of the exposed person
    #[serde(default)]
    pub name: String,
    /// Public office held
    #[serde(default)]
    pub office: String,
    /// Government body
    #[serde(default)]
    pub agency: String,
    /// Exposure level
    pub level: ExposureLevel,
}

/// Exposure level of a PEP record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureLevel {
    /// High exposure
    #[serde(alias = "High", alias = "Alto", alias = "alto")]
    High,
    /// Medium exposure
    #[serde(alias = "Medium", alias = "Médio", alias = "médio", alias = "Medio", alias = "medio")]
    Medium,
    /// Low exposure
    #[serde(alias = "Low", alias = "Baixo", alias = "baixo")]
    Low,
}

// ---------------------------------------------------------------------------
// Sanctions
// ---------------------------------------------------------------------------

/// Sanction lookups, national and international
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sanctions {
    /// National registry lookups
    pub national: Vec<NationalSanction>,

    /// International list lookups
    pub international: Vec<InternationalSanction>,
}

/// Result of a national registry lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalSanction {
    /// Registry consulted
    #[serde(rename = "type")]
    pub kind: NationalSanctionKind,

    /// The subject was found in the registry
    #[serde(default)]
    pub found: bool,

    /// Free-form details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// National registries a subject is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationalSanctionKind {
    /// Labor debt clearance certificate
    #[serde(alias = "Certidão Débitos Trabalhistas")]
    LaborDebt,
    /// Slave-labor employer list
    #[serde(alias = "Trabalho Escravo")]
    SlaveLabor,
    /// Severance fund regularity
    #[serde(alias = "Regularidade FGTS")]
    SeveranceFund,
    /// Administrative improbity registry
    #[serde(alias = "CNIA")]
    ImprobityRegistry,
    /// Arrest-warrant registry
    #[serde(alias = "BNMP")]
    ArrestWarrants,
    /// Antitrust authority proceedings
    #[serde(alias = "CADE")]
    Antitrust,
    /// Ineligible and suspended companies registry
    #[serde(alias = "CEIS")]
    IneligibleCompanies,
    /// Punished companies registry
    #[serde(alias = "CNEP")]
    PunishedCompanies,
    /// Impaired nonprofit entities registry
    #[serde(alias = "CEPIM")]
    ImpairedNonprofits,
    /// Disqualified suppliers
    #[serde(alias = "Inabilitados/Inidôneos")]
    DisqualifiedSuppliers,
    /// Federal active debt registry
    #[serde(alias = "Dívida Ativa União")]
    FederalActiveDebt,
    /// State tax regularity
    #[serde(alias = "Regularidade Fiscal Estadual")]
    StateTax,
    /// Environmental agency embargoes
    #[serde(alias = "IBAMA")]
    Environmental,
    /// Any registry not listed above
    #[serde(other)]
    Other,
}

impl NationalSanctionKind {
    /// Severity tier of a hit in this registry
    pub fn tier(&self) -> SanctionTier {
        match self {
            NationalSanctionKind::SlaveLabor
            | NationalSanctionKind::ImprobityRegistry
            | NationalSanctionKind::ArrestWarrants
            | NationalSanctionKind::IneligibleCompanies
            | NationalSanctionKind::PunishedCompanies => SanctionTier::Critical,
            NationalSanctionKind::Antitrust
            | NationalSanctionKind::ImpairedNonprofits
            | NationalSanctionKind::FederalActiveDebt => SanctionTier::High,
            _ => SanctionTier::Standard,
        }
    }
}

/// Severity tier of a national sanction hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanctionTier {
    /// Disqualifying registries
    Critical,
    /// Serious registries
    High,
    /// Everything else
    Standard,
}

/// Result of an international list lookup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternationalSanction {
    /// List consulted (e.g. "OFAC SDN", "UN Security Council")
    pub list: String,

    /// The subject was found on the list
    pub found: bool,

    /// Free-form details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// ---------------------------------------------------------------------------
// Judicial processes
// ---------------------------------------------------------------------------

/// Court proceedings involving the subject
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JudicialProcesses {
    /// Total reported by the source, which may exceed the returned list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u32>,

    /// Returned proceedings
    pub processes: Vec<JudicialProcess>,
}

impl JudicialProcesses {
    /// Declared total, or the list length when the source gave none
    pub fn total(&self) -> usize {
        self.total_count
            .map(|n| n as usize)
            .unwrap_or(self.processes.len())
    }
}

/// A single court proceeding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JudicialProcess {
    /// Case number
    pub number: String,
    /// Court (e.g. "TRT-2", "TJSP")
    pub court: String,
    /// Subject matter
    pub subject: String,
    /// Procedural class
    pub class: String,
    /// Side the subject is on
    pub side: ProcessSide,
    /// Current status
    pub status: ProcessStatus,
}

impl JudicialProcess {
    /// Civil proceeding: "cível" in class or subject
    pub fn is_civil(&self) -> bool {
        contains_any(&self.class, &["cível"]) || contains_any(&self.subject, &["cível"])
    }

    /// Criminal proceeding: "criminal" in class or subject, or "penal" in class
    pub fn is_criminal(&self) -> bool {
        contains_any(&self.class, &["criminal", "penal"])
            || contains_any(&self.subject, &["criminal"])
    }

    /// Labor proceeding, by class, subject or a labor court
    pub fn is_labor(&self) -> bool {
        contains_any(&self.class, &["trabalh"])
            || contains_any(&self.subject, &["trabalh"])
            || contains_any(&self.court, &["trt"])
    }

    /// Status is active
    pub fn is_active(&self) -> bool {
        self.status == ProcessStatus::Active
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    let text = text.to_lowercase();
    needles.iter().any(|needle| text.contains(needle))
}

/// Side of a proceeding the subject is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessSide {
    /// The subject filed the proceeding
    #[serde(alias = "Plaintiff", alias = "Ativo", alias = "ativo")]
    Plaintiff,
    /// The subject is the respondent
    #[serde(alias = "Respondent", alias = "Passivo", alias = "passivo")]
    Respondent,
    /// Third party or unknown
    #[default]
    #[serde(alias = "Neutral", alias = "Neutro", alias = "neutro")]
    Neutral,
}

/// Status of a proceeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    /// Ongoing
    #[serde(alias = "Active", alias = "Ativo", alias = "ativo")]
    Active,
    /// Archived
    #[default]
    #[serde(alias = "Archived", alias = "Arquivado", alias = "arquivado")]
    Archived,
    /// Closed
    #[serde(alias = "Closed", alias = "Baixado", alias = "baixado")]
    Closed,
    /// Suspended
    #[serde(alias = "Suspended", alias = "Suspenso", alias = "suspenso")]
    Suspended,
}

// ---------------------------------------------------------------------------
// Administrative processes
// ---------------------------------------------------------------------------

/// Administrative proceedings, split by source registry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdministrativeProcesses {
    /// Federal tax authority protocol registry
    #[serde(alias = "comprot")]
    pub tax_authority: Vec<AdministrativeProcess>,

    /// Federal prosecution service
    #[serde(alias = "mpf")]
    pub prosecution: Vec<AdministrativeProcess>,
}

impl AdministrativeProcesses {
    /// Every record across all registries
    pub fn records(&self) -> impl Iterator<Item = &AdministrativeProcess> {
        self.tax_authority.iter().chain(self.prosecution.iter())
    }
}

/// A single administrative proceeding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdministrativeProcess {
    /// Protocol number
    pub number: String,
    /// Agency handling the proceeding
    pub agency: String,
    /// Subject matter
    pub subject: String,
    /// Free-form status
    pub status: String,
    /// Fine imposed, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
}

impl AdministrativeProcess {
    /// Whether a nonzero fine was imposed
    pub fn has_fine(&self) -> bool {
        self.fine.is_some_and(|amount| amount > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(class: &str, subject: &str, court: &str) -> JudicialProcess {
        JudicialProcess {
            class: class.to_string(),
            subject: subject.to_string(),
            court: court.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_json_is_empty_dossier() {
        let dossier: ComplianceDossier = serde_json::from_str("{}").unwrap();
        assert!(dossier.is_empty());
    }

    #[test]
    fn test_parse_full_dossier() {
        let json = r#"{
            "identifier": "11.222.333/0001-81",
            "registration": { "name": "Acme", "status": "Ativo" },
            "ownership": { "shareholders": [{ "name": "A" }] },
            "participations": { "entities": [{ "name": "B", "situation": "Inativa" }] },
            "politicalExposure": { "isPEP": true, "details": [{ "level": "Médio" }] },
            "sanctions": {
                "national": [{ "type": "slave_labor", "found": true }, { "type": "unknown_registry" }],
                "international": [{ "list": "OFAC", "found": false }]
            },
            "judicialProcesses": {
                "totalCount": 12,
                "processes": [{ "class": "Cível", "side": "Passivo", "status": "Ativo" }]
            },
            "administrativeProcesses": { "comprot": [{ "fine": 1500.0 }], "mpf": [] }
        }"#;

        let dossier: ComplianceDossier = serde_json::from_str(json).unwrap();
        assert_eq!(dossier.registration.unwrap().status, RegistrationStatus::Active);
        assert!(!dossier.participations.unwrap().entities[0].is_active());

        let pep = dossier.political_exposure.unwrap();
        assert!(pep.is_pep);
        assert_eq!(pep.details[0].level, ExposureLevel::Medium);

        let sanctions = dossier.sanctions.unwrap();
        assert_eq!(sanctions.national[1].kind, NationalSanctionKind::Other);
        assert!(!sanctions.national[1].found);

        let judicial = dossier.judicial_processes.unwrap();
        assert_eq!(judicial.total(), 12);
        assert_eq!(judicial.processes[0].side, ProcessSide::Respondent);
        assert!(judicial.processes[0].is_active());

        let admin = dossier.administrative_processes.unwrap();
        assert_eq!(admin.records().filter(|p| p.has_fine()).count(), 1);
    }

    #[test]
    fn test_process_tags() {
        assert!(process("Procedimento Cível", "", "").is_civil());
        assert!(process("Execução Penal", "", "").is_criminal());
        assert!(process("AÇÃO CRIMINAL", "", "").is_criminal());
        assert!(process("", "Crimes contra o patrimônio - Criminal", "").is_criminal());
        assert!(process("", "Reclamação Trabalhista", "").is_labor());
        assert!(process("", "", "TRT-2").is_labor());
        assert!(!process("Execução Fiscal", "Tributário", "TRF-3").is_labor());
    }

    #[test]
    fn test_civil_public_action_is_not_civil() {
        let process = process("Ação Civil Pública", "", "");
        assert!(!process.is_civil());
        assert!(!process.is_criminal());
    }

    #[test]
    fn test_penalty_clause_subject_is_not_criminal() {
        assert!(!process("Procedimento Comum", "Multa - Cláusula Penal", "").is_criminal());
    }

    #[test]
    fn test_labor_matches_only_portuguese_stem_or_court() {
        assert!(!process("Employment dispute", "Labor law", "TJSP").is_labor());
        assert!(process("", "", "trt-15").is_labor());
    }

    #[test]
    fn test_source_registry_labels_parse_to_tiers() {
        let cases = [
            ("Trabalho Escravo", SanctionTier::Critical),
            ("CNIA", SanctionTier::Critical),
            ("BNMP", SanctionTier::Critical),
            ("CEIS", SanctionTier::Critical),
            ("CNEP", SanctionTier::Critical),
            ("CADE", SanctionTier::High),
            ("CEPIM", SanctionTier::High),
            ("Dívida Ativa União", SanctionTier::High),
            ("Certidão Débitos Trabalhistas", SanctionTier::Standard),
            ("Regularidade FGTS", SanctionTier::Standard),
            ("Inabilitados/Inidôneos", SanctionTier::Standard),
            ("Regularidade Fiscal Estadual", SanctionTier::Standard),
            ("IBAMA", SanctionTier::Standard),
        ];

        for (label, tier) in cases {
            let json = format!(r#"{{"type": "{}", "found": true}}"#, label);
            let sanction: NationalSanction = serde_json::from_str(&json).unwrap();
            assert_ne!(sanction.kind, NationalSanctionKind::Other, "{}", label);
            assert_eq!(sanction.kind.tier(), tier, "{}", label);
        }
    }

    #[test]
    fn test_sanction_tiers() {
        assert_eq!(NationalSanctionKind::ArrestWarrants.tier(), SanctionTier::Critical);
        assert_eq!(NationalSanctionKind::FederalActiveDebt.tier(), SanctionTier::High);
        assert_eq!(NationalSanctionKind::Environmental.tier(), SanctionTier::Standard);
        assert_eq!(NationalSanctionKind::Other.tier(), SanctionTier::Standard);
    }

    #[test]
    fn test_judicial_total_defaults_to_list_length() {
        let judicial = JudicialProcesses {
            total_count: None,
            processes: vec![JudicialProcess::default(), JudicialProcess::default()],
        };
        assert_eq!(judicial.total(), 2);
    }

    #[test]
    fn test_fine_detection() {
        let mut record = AdministrativeProcess::default();
        assert!(!record.has_fine());
        record.fine = Some(0.0);
        assert!(!record.has_fine());
        record.fine = Some(10.0);
        assert!(record.has_fine());
    }
}
