use quiz_core::model::{FinalProfile, placeholder};

/// Display order for the four house score bars.
pub const HOUSE_ORDER: [&str; 4] = ["Gryffindor", "Hufflepuff", "Ravenclaw", "Slytherin"];

/// Fixed scaling contract with the backend's score range (roughly 0..=5):
/// a bar's width is `min(100, value * 18)` percent.
const BAR_SCALE: f64 = 18.0;

#[derive(Clone, Debug, PartialEq)]
pub struct HouseBarVm {
    pub house: &'static str,
    pub value: f64,
    pub width_pct: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileFieldVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileVm {
    pub house: String,
    pub house_desc: String,
    pub crest: &'static str,
    pub fields: Vec<ProfileFieldVm>,
    pub bars: Vec<HouseBarVm>,
    pub extras_pretty: String,
}

#[must_use]
pub fn map_profile(profile: &FinalProfile) -> ProfileVm {
    let field = |label: &'static str, value: Option<&str>| ProfileFieldVm {
        label,
        value: placeholder(value).to_string(),
    };

    let fields = vec![
        field("House", profile.house.as_deref()),
        field("Patronus", profile.patronus.as_deref()),
        field("Wand", profile.wand.as_deref()),
        field("Best Friend", profile.bestie.as_deref()),
        field("Rival", profile.enemy.as_deref()),
        field("Signature Skill", profile.skill.as_deref()),
        field("Quidditch Role", profile.quidditch_role.as_deref()),
    ];

    let bars = HOUSE_ORDER
        .iter()
        .map(|house| {
            let value = profile.house_score(house);
            HouseBarVm {
                house,
                value,
                width_pct: (value * BAR_SCALE).clamp(0.0, 100.0),
            }
        })
        .collect();

    ProfileVm {
        house: placeholder(profile.house.as_deref()).to_string(),
        house_desc: profile.house_desc.clone().unwrap_or_default(),
        crest: crest_for(profile.house.as_deref()),
        fields,
        bars,
        extras_pretty: serde_json::to_string_pretty(&profile.extras)
            .unwrap_or_else(|_| "{}".to_string()),
    }
}

fn crest_for(house: Option<&str>) -> &'static str {
    match house {
        Some("Gryffindor") => "\u{1F981}",
        Some("Hufflepuff") => "\u{1F9A1}",
        Some("Ravenclaw") => "\u{1F985}",
        Some("Slytherin") => "\u{1F40D}",
        _ => "\u{1F3F0}",
    }
}
