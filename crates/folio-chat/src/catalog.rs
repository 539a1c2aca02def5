//! Built-in portfolio rule table.
//!
//! Ordering matters: biography rules come before the broad catch-alls
//! ("skills", "about") so generic keywords cannot shadow specific ones.

use folio_core::SideEffect;

use crate::rules::{MatcherGroup, ResponseRule, RuleTable};

const GREETING: &str = "Hey there! Welcome! I'm {assistant}, here to chat about the amazing {subject}.\n\n\
\"Success is where preparation meets opportunity\" - {subject}\n\n\
Skills, projects, or autobiography? Say \"born\", \"hustle\", \"juice\", or \"valedictorian\".";

const DEFAULT_REPLY: &str = "Happy to help! Here's what I know about {short}:\n\
• \"skills\" - IT expertise\n\
• \"projects\" - Amazing work\n\
• \"born\" - Life story start\n\
• \"juice\" - Hustle story\n\
• \"valedictorian\" - Big win\n\
• \"book appointment\" - Connect directly\n\n\
What's got you excited about {short} today?";

const SKILLS: &str = "{short}'s superpowers!\n\
• NETWORKING: Subnetting, routing, troubleshooting\n\
• SYSTEMS: Linux & Windows server administration\n\
• CYBERSECURITY: Training & awareness\n\
• WEB DEV: Modern responsive websites (HTML, Tailwind CSS)\n\
• DESIGN: Adobe Creative Suite, print and digital design\n\n\
Which area excites you most?";

const PROJECTS: &str = "{short}'s game-changing projects!\n\
• InfoCheck Liberia - Fighting fake news\n\
• School Management System - Revolutionizing education\n\
• Bequizzy de Blogger - Personal content platform\n\
• LLeads Liberia - IT related solutions\n\n\
Which sounds coolest?";

const ABOUT: &str = "{subject} is an IT professional from Liberia!\n\
• Networking wizard - makes complex networks simple\n\
• Cybersecurity advocate - keeps data safe\n\
• Web developer - builds beautiful sites\n\n\
Skills, projects, or autobiography?";

/// The canonical rule table with persona placeholders still in place.
///
/// Call [`RuleTable::personalize`] before use.
pub fn portfolio_rules() -> RuleTable {
    let greeting = ResponseRule::with_groups(
        "greeting",
        vec![MatcherGroup::phrases(&[
            "good morning",
            "good afternoon",
            "good evening",
            "greetings",
        ])
        .with_words(&["hi", "hello", "hey"])],
        GREETING,
    );

    let rules = vec![
        ResponseRule::with_groups(
            "who_is",
            vec![
                MatcherGroup::phrases(&["who"]),
                MatcherGroup::phrases(&["{short}", "name"]).with_words(&["you"]),
            ],
            "{subject} was born July 5, 1999, in Gbarnga City, Bong County. He's a BSc IT \
             student at BlueCrest University (Networking & System Admin), a former \
             valedictorian, a NOCAL scholar, and a self-made success from post-war Liberia.",
        ),
        ResponseRule::any(
            "birth",
            &["born", "birth", "1999", "nyenian"],
            "{short} was born July 5, 1999 at CB Dumba Hospital, Civil Compound, Gbarnga City. \
             The 'N' stands for Nyenian, Kpelle for 'The World', a name given by his aunt \
             Annie T. Sumo.",
        ),
        ResponseRule::any(
            "losses",
            &["grandfather", "grandmother", "died", "passed away"],
            "{short} lost his grandfather in 2008, before he could see the school promise \
             fulfilled, and his grandmother in 2014, just after the Ebola crisis. Both shaped \
             his determination.",
        ),
        ResponseRule::any(
            "family",
            &["family", "parents", "childhood", "grand"],
            "After his parents separated, {short} was raised by his grandparents and his aunt \
             Esther N. Sumo. The family lived on sugarcane farming, an hour's walk from home, \
             during the hard post-war years.",
        ),
        ResponseRule::with_groups(
            "health",
            vec![MatcherGroup::phrases(&["sick", "health", "illness"]).with_words(&["ill"])],
            "As a toddler {short} survived a serious illness, and another nearly took him at \
             age 11 just as he started school. Both times family dedication and faith brought \
             a full recovery.",
        ),
        ResponseRule::with_groups(
            "first_school",
            vec![
                MatcherGroup::phrases(&["school"]),
                MatcherGroup::phrases(&["first", "kingdom"]).with_words(&["11"]),
            ],
            "{short} started school at age 11 (2010) at Kingdom Garden ABC, Jorphenmue Public \
             School, and earned double promotions despite another illness.",
        ),
        ResponseRule::any(
            "relocation",
            &["2017", "monrovia", "uncle"],
            "On July 21, 2017, at 18, {short} moved to Montserrado to live with his uncle in \
             Wood Camp, Paynesville. His uncle said: 'You're staying for school.' {short} \
             replied: 'Thank you so much, Uncle. I am grateful.'",
        ),
        ResponseRule::any(
            "juice_hustle",
            &["juice", "selling", "hustle"],
            "{short} sold cold juice after school on a 20% commission (20 LD per 100 LD sold). \
             Best days: 1,200 LD in sales for 240 LD earned. He left school at 1:30 PM, walked \
             20 minutes, prepared and sold until evening.",
        ),
        ResponseRule::with_groups(
            "businesses",
            vec![MatcherGroup::phrases(&["business", "mosquito", "minutes"])
                .with_words(&["belt", "belts"])],
            "He also sold mosquito coils, Orange and Lonestar phone minutes (repaying his \
             cousin's loan in two weeks) and waist belts, supported by his uncle's wife and \
             his parents.",
        ),
        ResponseRule::with_groups(
            "stage_name",
            vec![MatcherGroup::phrases(&["bequizzy"]).with_words(&["dj"])],
            "DJ Bequizzy is {short}'s stage name, born from helping fetch water. It reflects a \
             belief he holds close: 'God never forgets anyone.'",
        ),
        ResponseRule::any(
            "valedictorian",
            &["valedictorian", "graduate", "waec"],
            "{short} graduated as valedictorian of Pipeline Junior & Senior High School (MCSS) \
             on September 29, 2022.",
        ),
        ResponseRule::any(
            "scholarship",
            &["nocal", "scholarship"],
            "After his valedictory speech, {short} received a NOCAL national scholarship for \
             any university, a major milestone after years of self-funding his education.",
        ),
        ResponseRule::with_groups(
            "studies",
            vec![MatcherGroup::phrases(&[
                "university",
                "bluecrest",
                "degree",
                "study",
                "studies",
            ])
            .with_words(&["it"])],
            "{short} is studying for a BSc in Information Technology (Networking & System \
             Admin) at BlueCrest University Liberia, and trains at Orange Digital Center in \
             web development, IoT, TinyML, cybersecurity and graphic design.",
        ),
        ResponseRule::any(
            "mindset",
            &["mindset", "faith", "purpose"],
            "{short}'s creed: \"I know my background offers no guaranteed support. I must \
             stand firmly... God will fulfill His purpose. I will reach my destination.\" \
             Kindness is not weakness.",
        ),
        ResponseRule::any(
            "skills",
            &["skill", "career", "expertise", "what can he do"],
            SKILLS,
        ),
        ResponseRule::any(
            "experience",
            &["experience", "job", "employ"],
            "Professional experience:\n\
             • Curtis Professional Security\n\
             • Isaiah Tech Solution Group",
        ),
        ResponseRule::with_groups(
            "projects",
            vec![MatcherGroup::phrases(&["project", "portfolio"]).with_words(&["work"])],
            PROJECTS,
        ),
        ResponseRule::any(
            "appointment",
            &["appointment", "book", "meet", "schedule", "discuss", "contact"],
            "Perfect! I've opened {short}'s appointment form. He responds within 24 hours!\n\n\
             What's this meeting about?",
        )
        .with_side_effect(SideEffect::OpenAppointmentForm),
        ResponseRule::with_groups(
            "voice_call",
            vec![MatcherGroup::default().with_words(&["call", "voice", "phone"])],
            "Voice call ready! Click the microphone to talk with {assistant}. Say \
             \"book appointment\" or ask about skills.",
        ),
        ResponseRule::any(
            "how_are_you",
            &["how are you", "how r u", "how are u"],
            "I'm fantastic, thanks! Always excited to talk about {short}.\n\n\
             Skills, projects, or his journey from juice seller to valedictorian?",
        ),
        ResponseRule::any(
            "compliment",
            &["nice", "cool", "awesome", "great"],
            "I know, right? {short}'s work is!\n\n\
             Skills, projects, autobiography (\"born\", \"juice\"), or book time?",
        ),
        ResponseRule::any(
            "thanks",
            &["thank", "appreciate", "cheers"],
            "My pleasure! {short}'s story inspires everyone.\n\n\
             Skills, projects, or autobiography before you go?",
        ),
        ResponseRule::with_groups(
            "goodbye",
            vec![MatcherGroup::phrases(&["goodbye", "see you", "farewell"]).with_words(&["bye"])],
            "Goodbye! Have a wonderful day.",
        ),
        ResponseRule::any(
            "referral",
            &["linkedin", "referral", "found", "hear about", "friend"],
            "Awesome! Love hearing {short}'s network is growing.\n\
             What would you like to know? Skills, projects, or his story?",
        ),
        ResponseRule::with_groups(
            "fun",
            vec![MatcherGroup::phrases(&["joke"]).with_words(&["fun", "haha"])],
            "Glad you're having fun! {short} says: \"Code is poetry, networks are symphonies!\"\n\n\
             Skills, projects, or about him?",
        ),
        ResponseRule::any("about", &["{short}", "who", "about"], ABOUT),
    ];

    RuleTable {
        greeting,
        rules,
        default_reply: DEFAULT_REPLY.to_string(),
    }
}
