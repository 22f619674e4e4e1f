//! Closed vocabularies shared by the prompt and the graph compiler.
//!
//! The prompt renders these lists verbatim, so the enums are the single
//! source of truth for every controlled label the extractor may emit.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub vocabulary: &'static str,
    pub label: String,
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a known {}", self.label, self.vocabulary)
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $vocab:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const NAME: &'static str = $vocab;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    _ => Err(UnknownLabel {
                        vocabulary: $vocab,
                        label: s.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    SocialStatus, "social status" {
        Emperor => "emperor",
        Empress => "empress",
        ImperialFamily => "imperial-family",
        SenatorClarissimus => "senator-clarissimus",
        SenatorConsularis => "senator-consularis",
        SenatorPraetorius => "senator-praetorius",
        EquestrianPerfectissimus => "equestrian-perfectissimus",
        EquestrianEgregius => "equestrian-egregius",
        EquestrianSplendidus => "equestrian-splendidus",
        Equestrian => "equestrian",
        Decurio => "decurio",
        Duovir => "duovir",
        Aedilis => "aedilis",
        Quaestor => "quaestor",
        MunicipalMagistrate => "municipal-magistrate",
        Legatus => "legatus",
        Tribunus => "tribunus",
        Centurio => "centurio",
        Soldier => "soldier",
        Veteran => "veteran",
        Freedman => "freedman",
        Freedwoman => "freedwoman",
        Slave => "slave",
        Freeborn => "freeborn",
        Flamen => "flamen",
        Pontifex => "pontifex",
        Augur => "augur",
        Sacerdos => "sacerdos",
        Merchant => "merchant",
        Medicus => "medicus",
        Gladiator => "gladiator",
        Actor => "actor",
        Artisan => "artisan",
        Unknown => "unknown",
        Citizen => "citizen",
    }
}

impl SocialStatus {
    /// Prompt grouping and the Latin cue for each label.
    pub fn group_and_hint(self) -> (&'static str, &'static str) {
        use SocialStatus::*;
        match self {
            Emperor => ("Imperial Family", "for Augustus, Caesar with imperial power"),
            Empress => ("Imperial Family", "for Augusta"),
            ImperialFamily => ("Imperial Family", "for other imperial family members"),
            SenatorClarissimus => ("Senatorial Order", "vir clarissimus, v.c."),
            SenatorConsularis => ("Senatorial Order", "consular rank"),
            SenatorPraetorius => ("Senatorial Order", "praetorian rank"),
            EquestrianPerfectissimus => ("Equestrian Order", "vir perfectissimus, v.p."),
            EquestrianEgregius => ("Equestrian Order", "vir egregius, v.e."),
            EquestrianSplendidus => ("Equestrian Order", "vir splendidus"),
            Equestrian => ("Equestrian Order", "equo publico, general equestrian"),
            Decurio => ("Municipal Elite", "decurion, member of local senate"),
            Duovir => ("Municipal Elite", "duumvir"),
            Aedilis => ("Municipal Elite", "aedile"),
            Quaestor => ("Municipal Elite", "quaestor"),
            MunicipalMagistrate => ("Municipal Elite", "other municipal office holders"),
            Legatus => ("Military", "legate"),
            Tribunus => ("Military", "tribune"),
            Centurio => ("Military", "centurion"),
            Soldier => ("Military", "miles, general soldier"),
            Veteran => ("Military", "veteranus"),
            Freedman => ("Legal Status", "libertus"),
            Freedwoman => ("Legal Status", "liberta"),
            Slave => ("Legal Status", "servus, serva"),
            Freeborn => ("Legal Status", "ingenuus, ingenua"),
            Flamen => ("Priesthood", "flamen"),
            Pontifex => ("Priesthood", "pontiff"),
            Augur => ("Priesthood", "augur"),
            Sacerdos => ("Priesthood", "priest/priestess"),
            Merchant => ("Occupations", "negotiator, mercator"),
            Medicus => ("Occupations", "doctor"),
            Gladiator => ("Occupations", "gladiator"),
            Actor => ("Occupations", "actor"),
            Artisan => ("Occupations", "faber, etc."),
            Unknown => ("Other", "if status cannot be determined"),
            Citizen => ("Other", "if only citizenship is mentioned"),
        }
    }
}

vocabulary! {
    PositionType, "career position type" {
        Military => "military",
        ImperialAdministration => "imperial-administration",
        ProvincialAdministration => "provincial-administration",
        LocalAdministration => "local-administration",
        ImperialPriesthood => "imperial-priesthood",
        ProvincialPriesthood => "provincial-priesthood",
        LocalPriesthood => "local-priesthood",
        Occupation => "occupation",
        Other => "other",
    }
}

impl PositionType {
    pub fn hint(self) -> &'static str {
        use PositionType::*;
        match self {
            Military => "Military positions (legatus, tribunus, centurio, praefectus of military units, etc.)",
            ImperialAdministration => "Imperial administrative positions (praefectus praetorio, praefectus urbi, procurator, a rationibus, etc.)",
            ProvincialAdministration => "Provincial administrative positions (legatus Augusti pro praetore, proconsul, legatus legionis, etc.)",
            LocalAdministration => "Municipal/local administrative positions (duovir, aedilis, quaestor, decurio, etc.)",
            ImperialPriesthood => "Imperial cult priesthoods (flamen divi, sodalis, arvalis, etc.)",
            ProvincialPriesthood => "Provincial priesthoods (sacerdos provinciae, pontifex provinciae, etc.)",
            LocalPriesthood => "Local priesthoods (flamen municipii, pontifex, augur at local level, etc.)",
            Occupation => "Non-political occupations and professions (negotiator, mercator, medicus, faber, etc.)",
            Other => "Positions that don't fit the above categories or unclear classifications",
        }
    }
}

vocabulary! {
    RelationshipType, "relationship type" {
        Family => "family",
        Colleague => "colleague",
        Patronage => "patronage",
        Dedication => "dedication",
        Economic => "economic",
        Affiliation => "affiliation",
    }
}

impl RelationshipType {
    /// Standardized `property` labels for this relationship type.
    pub fn properties(self) -> &'static [&'static str] {
        use RelationshipType::*;
        match self {
            Family => &[
                "father", "mother", "son", "daughter", "brother", "sister", "spouse", "husband",
                "wife", "grandfather", "grandmother", "grandson", "granddaughter", "uncle",
                "aunt", "nephew", "niece", "cousin",
            ],
            Colleague => &["co-officer", "fellow-soldier", "colleague", "associate"],
            Patronage => &["patron", "client", "freedman", "freedwoman", "former-owner"],
            Dedication => &["dedicator", "dedicatee", "honored-person", "person-who-erected"],
            Economic => &[
                "buyer", "seller", "debtor", "creditor", "business-partner", "tenant",
                "landlord", "contractor", "employer", "employee",
            ],
            Affiliation => &[
                "member", "soldier", "decurion", "citizen", "resident", "officer", "priest",
            ],
        }
    }

    pub fn description(self) -> &'static str {
        use RelationshipType::*;
        match self {
            Family => "Family relationships",
            Colleague => "Colleague relationships",
            Patronage => "Patronage relationships",
            Dedication => "Dedicator and dedicatee relationships",
            Economic => "Economic relationships",
            Affiliation => "Affiliation relationships (person to community)",
        }
    }

    pub fn accepts_property(self, property: &str) -> bool {
        self.properties().contains(&property)
    }
}

/// Family properties that also produce a direct `has<Property>` edge.
pub const KINSHIP_EDGE_PROPERTIES: &[&str] =
    &["father", "mother", "son", "daughter", "brother", "sister"];

vocabulary! {
    CommunityType, "community type" {
        Legion => "legion",
        Cohort => "cohort",
        Ala => "ala",
        Turma => "turma",
        Centuria => "centuria",
        Vexillatio => "vexillatio",
        Classis => "classis",
        City => "city",
        Municipium => "municipium",
        Colonia => "colonia",
        Vicus => "vicus",
        Pagus => "pagus",
        Provincia => "provincia",
        Regio => "regio",
        Tribus => "tribus",
        Collegium => "collegium",
        Sodalitas => "sodalitas",
        Corpus => "corpus",
        Ordo => "ordo",
        Familia => "familia",
        Templum => "templum",
        Populus => "populus",
        Other => "other",
    }
}

impl CommunityType {
    pub fn group_and_hint(self) -> (&'static str, &'static str) {
        use CommunityType::*;
        match self {
            Legion => ("Military Units", "legio"),
            Cohort => ("Military Units", "cohors"),
            Ala => ("Military Units", "cavalry unit"),
            Turma => ("Military Units", "cavalry squadron"),
            Centuria => ("Military Units", "century"),
            Vexillatio => ("Military Units", "detachment"),
            Classis => ("Military Units", "fleet"),
            City => ("Administrative/Political Communities", "urbs, civitas, colonia"),
            Municipium => ("Administrative/Political Communities", "municipality"),
            Colonia => ("Administrative/Political Communities", "colony"),
            Vicus => ("Administrative/Political Communities", "village/settlement"),
            Pagus => ("Administrative/Political Communities", "rural district"),
            Provincia => ("Administrative/Political Communities", "province"),
            Regio => ("Administrative/Political Communities", "region"),
            Tribus => ("Administrative/Political Communities", "tribe - voting district"),
            Collegium => ("Religious/Social Organizations", "association, guild"),
            Sodalitas => ("Religious/Social Organizations", "religious association"),
            Corpus => ("Religious/Social Organizations", "corporate body"),
            Ordo => ("Religious/Social Organizations", "order, e.g., ordo decurionum"),
            Familia => ("Religious/Social Organizations", "household/familia"),
            Templum => ("Religious/Social Organizations", "temple community"),
            Populus => ("Other", "people/community"),
            Other => ("Other", "if none of the above fit"),
        }
    }
}

vocabulary! {
    BenefactionType, "benefaction type" {
        Construction => "construction",
        Repair => "repair",
        Donation => "donation",
        Games => "games",
        Feast => "feast",
        Other => "other",
    }
}

vocabulary! {
    Gender, "gender" {
        Male => "male",
        Female => "female",
        Unknown => "unknown",
    }
}

vocabulary! {
    Ethnicity, "ethnicity" {
        Roman => "Roman",
        RomanWithLocalName => "Roman with local name",
        Local => "local",
    }
}

/// Guidance only; object types are an open list.
pub const OBJECT_TYPE_GUIDANCE: &[(&str, &str)] = &[
    ("Building", "\"building\", \"temple\", \"bath\", \"road\", \"aqueduct\", etc."),
    ("Monetary donation", "\"money\", \"sportulae\", \"congiarium\", etc."),
    ("Games", "\"gladiatorial games\", \"theatrical performances\", etc."),
    ("Feast", "\"public banquet\", etc."),
    ("Statue", "\"statue\", \"signum\", etc."),
    ("Other", "\"other\", etc."),
];
