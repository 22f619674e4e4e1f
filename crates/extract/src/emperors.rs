//! Reference table of Roman emperors and their Wikidata identifiers.

use std::collections::BTreeMap;

pub const WIKIDATA_ENTITY_BASE: &str = "http://www.wikidata.org/entity/";

const BUILTIN: &[(&str, &str)] = &[
    ("Augustus", "Q1405"),
    ("Tiberius", "Q1407"),
    ("Caligula", "Q1409"),
    ("Claudius", "Q1411"),
    ("Nero", "Q1413"),
    ("Galba", "Q1414"),
    ("Otho", "Q1416"),
    ("Vitellius", "Q1417"),
    ("Vespasian", "Q1419"),
    ("Titus", "Q1421"),
    ("Domitian", "Q1423"),
    ("Nerva", "Q1424"),
    ("Trajan", "Q1425"),
    ("Hadrian", "Q1427"),
    ("Antoninus Pius", "Q1429"),
    ("Marcus Aurelius", "Q1430"),
    ("Lucius Verus", "Q1433"),
    ("Commodus", "Q1434"),
    ("Pertinax", "Q1436"),
    ("Didius Julianus", "Q1440"),
    ("Septimius Severus", "Q1442"),
    ("Caracalla", "Q1446"),
    ("Geta (emperor)", "Q183089"),
    ("Macrinus", "Q1752"),
    ("Diadumenian", "Q46840"),
    ("Elagabalus", "Q1762"),
    ("Severus Alexander", "Q1769"),
    ("Maximinus Thrax", "Q1777"),
    ("Gordian I", "Q1782"),
    ("Gordian II", "Q1803"),
    ("Pupienus", "Q1797"),
    ("Balbinus", "Q1805"),
    ("Gordian III", "Q1812"),
    ("Philip the Arab", "Q1817"),
    ("Philip II (Roman emperor)", "Q318865"),
    ("Decius", "Q1830"),
    ("Herennius Etruscus", "Q273253"),
    ("Trebonianus Gallus", "Q171023"),
    ("Hostilian", "Q46837"),
    ("Volusianus", "Q202222"),
    ("Aemilianus", "Q177980"),
    ("Silbannacus", "Q442570"),
    ("Valerian (emperor)", "Q46750"),
    ("Gallienus", "Q104475"),
    ("Saloninus", "Q297494"),
    ("Claudius Gothicus", "Q46762"),
    ("Quintillus", "Q185844"),
    ("Aurelian", "Q46780"),
    ("Tacitus (emperor)", "Q177988"),
    ("Florianus", "Q199946"),
    ("Probus (emperor)", "Q187068"),
    ("Carus", "Q187004"),
    ("Carinus", "Q190097"),
    ("Numerian", "Q46821"),
    ("Diocletian", "Q43107"),
    ("Maximian", "Q46768"),
    ("Galerius", "Q172168"),
    ("Constantius Chlorus", "Q131195"),
    ("Severus II", "Q46814"),
    ("Maxentius", "Q182070"),
    ("Licinius", "Q184549"),
    ("Maximinus Daza", "Q189095"),
    ("Valerius Valens", "Q311274"),
    ("Martinian (emperor)", "Q268744"),
    ("Constantine the Great", "Q8413"),
    ("Constantine II (emperor)", "Q46734"),
    ("Constans I", "Q185538"),
    ("Constantius II", "Q46418"),
    ("Magnentius", "Q212876"),
    ("Nepotianus", "Q367598"),
    ("Julian (emperor)", "Q33941"),
    ("Jovian (emperor)", "Q34074"),
    ("Valentinian I", "Q46720"),
    ("Valens", "Q172471"),
    ("Procopius (usurper)", "Q316284"),
    ("Gratian", "Q189108"),
    ("Magnus Maximus", "Q211396"),
    ("Valentinian II", "Q46846"),
    ("Eugenius", "Q313058"),
    ("Theodosius I", "Q46696"),
    ("Arcadius", "Q159369"),
    ("Honorius", "Q159798"),
    ("Constantine III (Western Roman emperor)", "Q209793"),
    ("Theodosius II", "Q160353"),
    ("Priscus Attalus", "Q316286"),
    ("Constantius III", "Q201905"),
    ("Joannes", "Q309847"),
    ("Valentinian III", "Q170026"),
    ("Marcian", "Q178004"),
    ("Petronius Maximus", "Q191940"),
    ("Avitus", "Q203198"),
    ("Majorian", "Q191956"),
    ("Libius Severus", "Q207121"),
    ("Anthemius", "Q211772"),
    ("Olybrius", "Q193678"),
    ("Glycerius", "Q202543"),
    ("Julius Nepos", "Q103860"),
    ("Romulus Augustulus", "Q130601"),
    ("Leo I (emperor)", "Q183776"),
    ("Leo II (emperor)", "Q191707"),
    ("Zeno (emperor)", "Q183452"),
    ("Basiliscus", "Q193056"),
    ("Anastasius I Dicorus", "Q173470"),
    ("Justin I", "Q183445"),
    ("Justinian I", "Q41866"),
    ("Justin II", "Q183813"),
    ("Tiberius II Constantine", "Q31491"),
    ("Maurice (emperor)", "Q181764"),
    ("Phocas", "Q31556"),
];

/// Canonical emperor name -> Wikidata QID.
///
/// Built once at startup and handed to whoever needs it; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmperorTable {
    entries: BTreeMap<String, String>,
}

impl EmperorTable {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, qid)| (name.to_string(), qid.to_string()))
                .collect(),
        }
    }

    pub fn qid(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains_qid(&self, qid: &str) -> bool {
        self.entries.values().any(|v| v == qid)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmperorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
