use crate::emperors::EmperorTable;
use crate::vocab::{
    BenefactionType, CommunityType, Ethnicity, Gender, OBJECT_TYPE_GUIDANCE, PositionType,
    RelationshipType, SocialStatus,
};

/// Above this many persons the extractor switches to the simplified format.
pub const SIMPLIFIED_PERSON_THRESHOLD: usize = 20;

const OUTPUT_SCHEMA: &str = r#"{
  "persons": [
    {
      "person_id": 0,
      "person_name": "Name of the person (Latin form)",
      "person_name_readable": "Name of the person (readable form)",
      "praenomen": "Praenomen if identifiable",
      "nomen": "Nomen gentilicium if identifiable",
      "cognomen": "Cognomen if identifiable",
      "person_name_normalized": "Emperors only: exact name from the emperor list",
      "person_name_link": "Emperors only: Wikidata QID from the emperor list",
      "social_status": "Label from the social status list",
      "social_status_evidence": "Text evidence for the social status",
      "gender": "male | female | unknown",
      "gender_evidence": "Text evidence for the gender",
      "ethnicity": "Roman | Roman with local name | local",
      "ethnicity_evidence": "Text evidence for the ethnicity",
      "age_at_death": "Age at death in years, if mentioned",
      "age_at_death_evidence": "Text evidence for the age at death",
      "has_career": true,
      "career_path": [
        {
          "position": "Title or office (Latin)",
          "position_normalized": "Title without philological remarks, nominative (Latin)",
          "position_abstract": "Core office title only, nominative (Latin)",
          "position_type": "Label from the position type list",
          "position_description": "Description of the position (English)",
          "order": 1
        }
      ],
      "benefactions": [
        {
          "benefaction_type": "Label from the benefaction type list",
          "object": "What was built/repaired/donated (Latin)",
          "object_type": "Object type label",
          "object_description": "Description of the object (English)",
          "benefaction_text": "Text expressing the benefaction",
          "cost": "Cost or amount if mentioned",
          "notes": "Additional information (e.g., de sua pecunia, sua impensa)"
        }
      ]
    }
  ],
  "communities": [
    {
      "community_id": 0,
      "community_name": "Name as it appears in the inscription (Latin)",
      "community_name_normalized": "Standardized Latin name",
      "community_type": "Label from the community type list",
      "community_description": "Brief description (English)",
      "evidence": "Text mentioning this community"
    }
  ],
  "person_relationships": [
    {
      "source_person_id": 0,
      "target_person_id": 1,
      "target_community_id": null,
      "type": "Label from the relationship type list",
      "property": "Label from the relationship property list",
      "property_text": "Text expressing the relationship",
      "notes": "Other relevant information"
    }
  ],
  "notes": "Other relevant information"
}"#;

/// Build the extraction prompt for one inscription.
///
/// `dating` is the inscription's date range in whole years; it is only shown
/// to the model when both bounds are known.
pub fn build_extraction_prompt(
    inscription_text: &str,
    dating: Option<(i64, i64)>,
    emperors: &EmperorTable,
) -> String {
    let dating_line = dating
        .map(|(from, to)| format!("\n\nInscription dating: {} - {} CE", from, to))
        .unwrap_or_default();

    let mut prompt = String::with_capacity(16 * 1024);

    prompt.push_str(
        "Please analyze the following Latin inscription and extract the information below in JSON format.\n\n",
    );
    prompt.push_str("Inscription text:\n");
    prompt.push_str(inscription_text);
    prompt.push_str(&dating_line);
    prompt.push_str("\n\n");

    prompt.push_str(&extraction_targets());
    prompt.push_str("\nOutput format (JSON):\n");
    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push_str("\n\nROMAN EMPERORS LIST (for person_name_normalized and person_name_link):\n");
    for (name, qid) in emperors.iter() {
        prompt.push_str(&format!("  - {} (Wikidata QID: {})\n", name, qid));
    }

    prompt.push_str("\nCOMMUNITY TYPES (controlled vocabulary for community_type):\n");
    push_grouped(&mut prompt, CommunityType::ALL.iter().map(|t| {
        let (group, hint) = t.group_and_hint();
        (group, t.as_str(), hint)
    }));

    prompt.push_str(&extraction_rules());

    prompt.push_str("\nSTANDARDIZED SOCIAL STATUS LABELS (use these EXACTLY to minimize variation):\n");
    push_grouped(&mut prompt, SocialStatus::ALL.iter().map(|s| {
        let (group, hint) = s.group_and_hint();
        (group, s.as_str(), hint)
    }));

    prompt.push_str(&career_rules());
    prompt.push_str("- Output JSON only and do not include any explanatory text.");

    prompt
}

fn extraction_targets() -> String {
    let mut out = String::from("Information to extract:\n");
    out.push_str(
        "1. The names of ALL persons mentioned in the inscription, whether main subjects, dedicators, \
         or mentioned in passing (officials who approved the inscription, family members, colleagues, etc.).\n",
    );
    out.push_str(
        "2. ALL communities/groups mentioned (legions, cities, towns, villages, associations, collegia, \
         tribes, etc.) with their Latin label, a normalized label and a community type from the list below.\n",
    );
    out.push_str(&format!(
        "3. For EACH person: social status, gender ({}) and ethnicity ({}) if evident from the text.\n",
        quoted(Gender::ALL.iter().map(|g| g.as_str())),
        quoted(Ethnicity::ALL.iter().map(|e| e.as_str())),
    ));
    out.push_str(
        "4. For EACH person, the career path in the exact order mentioned in the text, each position \
         classified with a position type from the list below.\n",
    );
    out.push_str(
        "5. For EACH person, any benefactions (evergetism): construction or repair of public buildings, \
         temples, baths, roads, or donations of money, games or feasts.\n",
    );
    out.push_str("    Benefaction types (use EXACTLY these labels):\n");
    for t in BenefactionType::ALL {
        out.push_str(&format!("        - \"{}\"\n", t.as_str()));
    }
    out.push_str("    Object types (use standardized labels):\n");
    for (group, labels) in OBJECT_TYPE_GUIDANCE {
        out.push_str(&format!("        - {}: {}\n", group, labels));
    }
    out.push_str("6. Relationships between persons, or between persons and communities.\n");
    out.push_str("    Relationship types (use EXACTLY these labels):\n");
    for t in RelationshipType::ALL {
        out.push_str(&format!("        - {}: type = \"{}\"\n", t.description(), t.as_str()));
    }
    out.push_str("\n    Relationship property labels by type:\n");
    for t in RelationshipType::ALL {
        out.push_str(&format!(
            "        {}: {}\n",
            t.as_str(),
            quoted(t.properties().iter().copied())
        ));
    }
    out.push_str(
        "\n    For economic relationships, look for terms like: emit, vendit, comparavit, mercatus est \
         (sale); debitor, creditor, debitum (debt); socius, consors (partnership); conductor, locator, \
         colonus (lease); operarius, redemptio operis (employment).\n",
    );
    out
}

fn extraction_rules() -> String {
    format!(
        r#"
Notes:
- Extract ALL persons into "persons" with unique person_id values starting from 0, and ALL communities into "communities" with unique community_id values starting from 0. Use empty arrays when there are none.
- If no person can be identified, create one entry with "person_name" set to "Unknown".
- ROMAN NAME STRUCTURE (tria nomina): fill praenomen (Gaius, Marcus, Lucius, ...), nomen (Iulius, Cornelius, ...) and cognomen (Caesar, Scipio, ...). "C(aius) Iulius Caesar" gives praenomen "Caius", nomen "Iulius", cognomen "Caesar". Leave all three empty when the structure cannot be identified. Freedmen usually carry their former owner's praenomen and nomen.
- If the social status is not evident, set "social_status" to "". Without career information set "has_career" to false and "career_path" to []. Without benefactions use [].
- SIMPLIFIED FORMAT FOR LARGE INSCRIPTIONS: if the inscription contains more than {threshold} persons, include for each person ONLY person_id, person_name, person_name_readable, praenomen, nomen, cognomen, person_name_normalized, person_name_link, social_status, social_status_evidence, gender, gender_evidence, ethnicity, ethnicity_evidence. OMIT age_at_death, age_at_death_evidence, has_career, career_path and benefactions. In "person_relationships" keep ONLY family relationships between persons and affiliation relationships to the main community.
- AGE AT DEATH: look for "vixit annis"/"vixit anni" + number, abbreviations such as "vix. ann.", "v. a.", "vix. a.", or "annos"/"annorum" + number. Convert Roman numerals to Arabic numbers (LX -> 60, XLV -> 45) and record the Latin text in "age_at_death_evidence". Ages given only in months or days go into the evidence with "age_at_death" left empty.
- Extract the career path in the order it appears in the inscription, which may differ from chronological order.
- CONSULAR DATING FORMULAS: do NOT extract consular offices that appear in a dating formula. Dating formulas use the ablative: "[Name] consule" or "[Name] et [Name] consulibus", e.g. "Imp(eratore) Domitiano Caes(are) Aug(usto) Germ(anico) XIIII co(n)s(ule)". When consul or related terms appear in any other case (nominative, genitive, dative, accusative) as part of a career, such as "consularis", "consul designatus" or "consuli designato", DO extract them.
- Record ALL relationships in "person_relationships":
  * person to person: set "source_person_id" and "target_person_id", and "target_community_id" to null, e.g. {{"source_person_id": 0, "target_person_id": 1, "target_community_id": null, "type": "family", "property": "father"}}
  * person to community: set "source_person_id" and "target_community_id", and "target_person_id" to null, e.g. {{"source_person_id": 0, "target_person_id": null, "target_community_id": 1, "type": "affiliation", "property": "soldier"}}
  * never set both "target_person_id" and "target_community_id".
- EMPEROR IDENTIFICATION: for any person whose social_status is "emperor", use the text, the dating range and historical context to pick the matching entry from the ROMAN EMPERORS LIST. Set person_name_normalized to the EXACT name from the list and person_name_link to its QID. Use the dating to tell apart emperors with similar names. Without a confident match, and for every non-emperor, leave both fields as empty strings.
- Benefaction cues: fecit, construxit, aedificavit, refecit, restituit, dedit, donavit, sumptibus suis, sua pecunia, sua impensa. Construction covers new structures (templum, aedes, basilica, forum, porta, murus, aquaeductus); repair covers refecit/restituit; donation covers sportulae and congiarium; games covers ludi and munera; feast covers epulum publicum.
"#,
        threshold = SIMPLIFIED_PERSON_THRESHOLD
    )
}

fn career_rules() -> String {
    let mut out = String::from(
        r#"
- For social status use the EXACT label from the list and prefer the most specific one (e.g. "senator-clarissimus" over "senator").
- For position_abstract keep only the core office title in the nominative: drop qualifiers (perpetuus, ordinarius, designatus, suffectus), prepositional phrases (in turmas equestres, cohortis primae, legionis III Augustae), geographic or unit designations and iteration markers (bis, ter, iterum).
  Examples: "flamen perpetuus" -> "flamen"; "adlectus in turmas equestres" -> "adlectus"; "praefectus cohortis primae" -> "praefectus"; "tribunus militum legionis III Augustae" -> "tribunus"; "consul ordinarius" -> "consul"; "duovir quinquennalis" -> "duovir".
- For position_type use EXACTLY one of these labels:
"#,
    );
    for t in PositionType::ALL {
        out.push_str(&format!("  * \"{}\": {}\n", t.as_str(), t.hint()));
    }
    out
}

fn push_grouped<'a>(
    out: &mut String,
    entries: impl Iterator<Item = (&'a str, &'a str, &'a str)>,
) {
    let mut current_group = "";
    for (group, label, hint) in entries {
        if group != current_group {
            out.push_str(&format!("{}:\n", group));
            current_group = group;
        }
        out.push_str(&format!("  - \"{}\" ({})\n", label, hint));
    }
}

fn quoted<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels
        .map(|l| format!("\"{}\"", l))
        .collect::<Vec<_>>()
        .join(", ")
}
