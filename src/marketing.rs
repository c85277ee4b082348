//! Social-media marketing copy generator.
//!
//! Pure string templating: pick a random entry from a static content table,
//! substitute `{product}`, `{problem}`, and `{demographic}` placeholders,
//! and assemble per-platform post scripts plus a posting calendar. No state
//! and no network; unknown keys fall back to default tables.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::products::Product;

#[derive(Debug, Error)]
pub enum MarketingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type MarketingResult<T> = Result<T, MarketingError>;

// ---- content tables ----

pub const HOOK_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "curiosity",
        &[
            "Wait why is nobody talking about this...",
            "I'm actually shook rn",
            "This just changed everything for me",
            "You've been doing it wrong this whole time",
            "The thing nobody tells you about {product}",
            "I found the thing TikTok keeps deleting...",
            "This is why you're still struggling with {problem}",
            "3AM purchase but it actually slaps",
            "My therapist said get one of these",
        ],
    ),
    (
        "pov",
        &[
            "POV: You finally give in and buy the {product}",
            "POV: Your room after the {product} arrives",
            "POV: Me showing my friends what I impulse bought",
            "POV: It's 2AM and you just set up your new {product}",
            "POV: The {product} actually works",
            "POV: When the thing from TikTok is actually good",
        ],
    ),
    (
        "listicle",
        &[
            "Things that will change your life for under $40",
            "Products that live in my head rent free",
            "Purchases that actually improved my life",
            "Things I bought that weren't a waste of money",
            "My 'I don't need it but I need it' purchases",
            "Things every {demographic} needs",
            "Amazon finds that are actually worth it 2025",
            "Stuff that hits different when you're an adult",
        ],
    ),
    (
        "transformation",
        &[
            "Room before vs after the {product}",
            "The glow up my room needed",
            "Turning my room into an aesthetic paradise",
            "How I transformed my space for under $50",
            "Small changes that made my room go viral",
        ],
    ),
    (
        "storytelling",
        &[
            "I was today years old when I found out about this",
            "So my friend recommended this and...",
            "Story time: Why I'll never go back",
            "The purchase that broke my TikTok algorithm",
            "How this $30 purchase changed my life (not clickbait)",
        ],
    ),
    (
        "question",
        &[
            "Why did no one tell me this existed?",
            "Am I the only one who didn't know about this?",
            "How is this not more popular?",
            "Where has this been all my life?",
        ],
    ),
    (
        "relatable",
        &[
            "When you finally buy the thing everyone's been talking about",
            "Me pretending I didn't just spend money on TikTok finds",
            "Things that make no sense but you need anyway",
            "My 'treat yourself' is getting out of hand",
        ],
    ),
];

pub const TRENDING_SOUNDS: &[&str] = &[
    "original sound - aestheticallypleasing",
    "Aesthetic - Tollan Kim",
    "Dissolve - Absofacto",
    "Snowfall - Øneheart & reidenshi",
    "Cupid - Twin Ver. - FIFTY FIFTY",
    "original sound - cozyvibes",
    "Sweater Weather - The Neighbourhood",
    "after hours - tiktok version",
    "original sound - room transformation",
];

const FALLBACK_HASHTAGS: &[&str] = &["#fyp", "#viral"];

const HASHTAGS_BY_NICHE: &[(&str, &[&str])] = &[
    (
        "galaxy-star-projector",
        &[
            "#galaxyprojector", "#roomdecor", "#aestheticroom", "#roommakeover",
            "#bedroomdecor", "#ledlights", "#starlight", "#cozybedroom",
            "#roomtour", "#amazonfinds", "#tiktokfinds", "#roominspo",
            "#auroraprojector", "#nightlight", "#fyp", "#viral",
        ],
    ),
    (
        "led-strip-lights",
        &[
            "#ledlights", "#roomsetup", "#gamingsetup", "#rgblights",
            "#neonlights", "#roomaesthetic", "#ledstrip", "#desksetup",
            "#gamerroom", "#pcsetup", "#twitchstreamer", "#contentcreator",
            "#roomdecor", "#fyp", "#viral",
        ],
    ),
    (
        "posture-corrector",
        &[
            "#posturecorrector", "#backpain", "#officelife", "#wfh",
            "#workfromhome", "#healthtok", "#wellnesstok", "#selfcare",
            "#deskjob", "#painrelief", "#healthylifestyle", "#ergonomic",
            "#fyp", "#viral",
        ],
    ),
    (
        "portable-blender",
        &[
            "#portableblender", "#smoothie", "#fitnesstok", "#gymtok",
            "#proteinshake", "#healthylifestyle", "#mealprep", "#fitness",
            "#gym", "#workout", "#healthyfood", "#amazonfinds",
            "#fyp", "#viral",
        ],
    ),
];

const SUBREDDITS_BY_NICHE: &[(&str, &[&str])] = &[
    (
        "galaxy-star-projector",
        &["r/CozyPlaces", "r/malelivingspace", "r/AmateurRoomPorn", "r/battlestations", "r/HomeDecorating"],
    ),
    (
        "led-strip-lights",
        &["r/battlestations", "r/pcmasterrace", "r/malelivingspace", "r/Twitch", "r/AverageBattlestations"],
    ),
    (
        "posture-corrector",
        &["r/posture", "r/backpain", "r/WorkOnline", "r/remotework", "r/Ergonomics"],
    ),
    (
        "portable-blender",
        &["r/fitness", "r/MealPrepSunday", "r/EatCheapAndHealthy", "r/gainit", "r/xxfitness"],
    ),
];

/// Hashtags for a product id, falling back to the generic pair.
pub fn niche_hashtags(product_id: &str) -> &'static [&'static str] {
    HASHTAGS_BY_NICHE
        .iter()
        .find(|(id, _)| *id == product_id)
        .map(|(_, tags)| *tags)
        .unwrap_or(FALLBACK_HASHTAGS)
}

fn niche_subreddits(product_id: &str) -> &'static [&'static str] {
    SUBREDDITS_BY_NICHE
        .iter()
        .find(|(id, _)| *id == product_id)
        .map(|(_, subs)| *subs)
        .unwrap_or(&["r/BuyItForLife"])
}

/// Substitute the three supported placeholders into a template.
pub fn fill_placeholders(template: &str, product: &str, problem: &str, demographic: &str) -> String {
    template
        .replace("{product}", product)
        .replace("{problem}", problem)
        .replace("{demographic}", demographic)
}

/// Pick a random hook, returning its category name and the filled-in text.
pub fn pick_hook(product: &Product, rng: &mut impl Rng) -> (&'static str, String) {
    // Tables are non-empty by construction; choose() can't return None here.
    let (category, hooks) = *HOOK_CATEGORIES.choose(rng).unwrap_or(&HOOK_CATEGORIES[0]);
    let hook = hooks.choose(rng).copied().unwrap_or("");
    let demographic = product.demographics.choose(rng).copied().unwrap_or("person");
    (category, fill_placeholders(hook, product.name, "this", demographic))
}

/// A caption in one of the hook styles; unknown styles fall back to
/// "curiosity".
pub fn generate_caption(product: &Product, style: &str) -> String {
    let name = product.name;
    match style {
        "pov" => format!(
            "POV: The {name} just arrived and you're about to transform your whole vibe ✨\n\n(link in bio)"
        ),
        "listicle" => format!(
            "Things I didn't know I needed until I got them:\n1. This {name}\n2. That's it. That's the list.\n\nLink in bio 🛒"
        ),
        "transformation" => format!(
            "My room literally went from 0 to 100 with this {name} 😭✨\n\nYou NEED this - link in bio!"
        ),
        "storytelling" => format!(
            "Story time: I bought this {name} at 3AM and it's the best decision I've ever made 💀\n\nGrab yours 👆"
        ),
        "question" => format!(
            "Why did NO ONE tell me about this {name}?? 😩\n\nI could've had this aesthetic SO much sooner\n\nLink. In. Bio."
        ),
        "relatable" => format!(
            "Me: I need to stop buying things from TikTok\nAlso me: *adds {name} to cart*\n\n(it was worth it tho)\nLink in bio 🛍️"
        ),
        _ => format!(
            "I finally caved and got the {name} everyone's been talking about... and wow 🤯\n\nLink in bio to get yours!"
        ),
    }
}

/// A complete TikTok video script: hook, sound, five shots, caption,
/// hashtags, posting tips.
pub fn generate_tiktok_script(product: &Product, rng: &mut impl Rng) -> String {
    let (category, hook) = pick_hook(product, rng);
    let sound = TRENDING_SOUNDS.choose(rng).copied().unwrap_or(TRENDING_SOUNDS[0]);
    let hashtags = niche_hashtags(product.id)
        .iter()
        .take(10)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{rule}\n\
         TIKTOK VIDEO SCRIPT - {name_upper}\n\
         {rule}\n\n\
         HOOK TYPE: {category}\n\
         SUGGESTED SOUND: {sound}\n\
         DURATION: 15-30 seconds\n\n\
         ---\n\n\
         SCREEN TEXT (0-3 sec):\n\"{hook}\"\n\n\
         SHOT 1 - THE HOOK (0-3 sec):\n\
         [Close-up of product in packaging OR dramatic reveal]\n\
         - Keep it mysterious\n- Dark/aesthetic lighting\n- Quick zoom effect\n\n\
         SHOT 2 - THE PROBLEM (3-7 sec):\n\
         [Show the \"before\" or pain point]\nTEXT: \"I was struggling with...\"\n\n\
         SHOT 3 - THE REVEAL (7-15 sec):\n\
         [Unbox or turn on product]\nTEXT: \"Until I found this...\"\n\
         - Satisfying unboxing sounds\n- Slow-mo of product in action\n- {key_feature}\n\n\
         SHOT 4 - THE RESULT (15-22 sec):\n\
         [Show transformation/reaction]\nTEXT: \"Now look at this...\"\n\n\
         SHOT 5 - CTA (22-30 sec):\n\
         [Point to product or screen]\nTEXT: \"Only ${price:.2} - Link in bio\"\n\n\
         ---\n\n\
         CAPTION:\n{caption}\n\n\
         HASHTAGS:\n{hashtags}\n\n\
         ---\n\n\
         POSTING TIPS:\n\
         - Best times: 7-9 PM, 11 AM-1 PM (your audience's timezone)\n\
         - Reply to comments in first hour\n\
         - Pin a comment with \"Link in bio!\"\n\
         - Duet/stitch trending videos about the product\n",
        rule = "=".repeat(60),
        name_upper = product.name.to_uppercase(),
        category = category,
        sound = sound,
        hook = hook,
        key_feature = product.key_feature,
        price = product.price(),
        caption = generate_caption(product, category),
        hashtags = hashtags,
    )
}

/// Instagram Reel caption, story sequence, and carousel outline.
pub fn generate_instagram_content(product: &Product) -> String {
    let features: String = product
        .features
        .iter()
        .take(4)
        .map(|f| format!("\n- {}", f))
        .collect();
    let hashtags = niche_hashtags(product.id)
        .iter()
        .take(15)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{rule}\n\
         INSTAGRAM CONTENT - {name_upper}\n\
         {rule}\n\n\
         REEL CAPTION:\n---\n\
         ✨ The {name} is giving everything I needed and more ✨\n\n\
         Here's why this is my new favorite purchase:{features}\n\n\
         Would you try this? Drop a 🌟 if you want the link!\n\n\
         .\n.\n.\n{hashtags}\n---\n\n\
         STORY SEQUENCE (5 slides):\n\n\
         SLIDE 1: Poll\n\"Have you seen this {name} on TikTok?\"\n[Yes / Not yet]\n\n\
         SLIDE 2: Product Shot\n[Aesthetic photo of product]\n\"Finally got mine 😍\"\n\n\
         SLIDE 3: In Action\n[Video/boomerang of product working]\n\"It's even better IRL\"\n\n\
         SLIDE 4: Link Sticker\n[Product photo with link]\n\"Link to shop 👆\"\n\n\
         SLIDE 5: Question Box\n\"What should I get next?\"\n[Question sticker]\n\n\
         ---\n\n\
         CAROUSEL POST IDEA:\n\
         Slide 1: \"5 Things That Changed My Room\"\n\
         Slide 2: The {name} (main shot)\n\
         Slide 3: Before vs After\n\
         Slide 4: Features breakdown\n\
         Slide 5: \"Link in bio to shop!\"\n",
        rule = "=".repeat(60),
        name_upper = product.name.to_uppercase(),
        name = product.name,
        features = features,
        hashtags = hashtags,
    )
}

/// Reddit strategy: target subreddits plus three value-first post formats.
pub fn generate_reddit_strategy(product: &Product) -> String {
    let subreddits = niche_subreddits(product.id).join("\n");

    format!(
        "{rule}\n\
         REDDIT STRATEGY - {name_upper}\n\
         {rule}\n\n\
         TARGET SUBREDDITS:\n{subreddits}\n\n\
         ---\n\n\
         POST TYPE 1: Room/Setup Showcase\n---\n\
         Title: \"Finally upgraded my setup, pretty happy with how it turned out\"\n\
         or: \"6 months of slowly improving my room, here's where I'm at\"\n\n\
         [Post a photo of your room/setup featuring the product]\n\n\
         Body: Share the journey, mention what you changed, let people ask about\n\
         specific items. When someone asks about the {name}, THEN share where you\n\
         got it.\n\n\
         Key: Never make it about selling. Make it about sharing your space.\n\n\
         ---\n\n\
         POST TYPE 2: Advice Request\n---\n\
         Title: \"What small purchases actually improved your daily life?\"\n\
         or: \"Looking for recommendations - what's actually worth buying?\"\n\n\
         Body: Ask genuinely. Engage with responses. Eventually mention what\n\
         worked for you.\n\n\
         ---\n\n\
         POST TYPE 3: Review Post\n---\n\
         Title: \"[Review] I've been using X for 3 months - here's my honest take\"\n\n\
         Body: honest pros, honest cons (shipping time if applicable), overall\n\
         rating out of 10, offer to answer questions.\n\n\
         ---\n\n\
         REDDIT RULES:\n\
         - Never direct link to your store (instant ban)\n\
         - Build karma first by being helpful\n\
         - 90% value, 10% subtle mention\n\
         - Read each subreddit's rules first\n",
        rule = "=".repeat(60),
        name_upper = product.name.to_uppercase(),
        subreddits = subreddits,
        name = product.name,
    )
}

/// An eight-tweet Twitter/X thread.
pub fn generate_twitter_thread(product: &Product) -> String {
    let first_feature = product.features.first().copied().unwrap_or("quality");
    let second_feature = product
        .features
        .get(1)
        .copied()
        .unwrap_or("How easy it is to use");

    format!(
        "{rule}\n\
         TWITTER/X THREAD - {name_upper}\n\
         {rule}\n\n\
         TWEET 1 (HOOK):\n\
         \"I spent ${price:.2} on something I saw on TikTok and I need to talk about it\n\nA thread 🧵\"\n\n\
         ---\n\n\
         TWEET 2:\n\
         \"So I kept seeing this {name} everywhere\n\n\
         At first I thought it was just another overhyped product\n\n\
         But after a month of seeing it... I caved\"\n\n\
         ---\n\n\
         TWEET 3:\n\
         \"Here's what I was expecting:\n- Cheap quality\n- Not as good as videos\n- Buyer's remorse\n\n\
         Here's what I got:\"\n\n\
         ---\n\n\
         TWEET 4:\n\
         \"The {first_feature} is actually insane\n\n\
         Like I genuinely didn't expect it to be THIS good for the price\"\n\n\
         [Attach photo/video]\n\n\
         ---\n\n\
         TWEET 5:\n\
         \"My favorite part? {second_feature}\n\nThis alone made it worth it for me\"\n\n\
         ---\n\n\
         TWEET 6:\n\
         \"The only con I can think of:\n- Shipping took about 2 weeks\n- That's literally it\"\n\n\
         ---\n\n\
         TWEET 7:\n\
         \"Would I recommend it?\n\nAbsolutely.\n\n\
         If you've been on the fence, this is your sign.\n\n\
         Link if anyone wants it: [bio link]\"\n\n\
         ---\n\n\
         TWEET 8:\n\
         \"Drop a 🔥 if you want me to share more finds like this\n\n\
         I've been testing a bunch of these viral products lately\"\n\n\
         BEST POSTING TIMES:\n\
         - 8-10 AM (morning scroll)\n- 12-1 PM (lunch break)\n- 5-6 PM (commute)\n- 8-10 PM (evening wind-down)\n",
        rule = "=".repeat(60),
        name_upper = product.name.to_uppercase(),
        price = product.price(),
        name = product.name,
        first_feature = first_feature,
        second_feature = second_feature,
    )
}

// ---- content calendar ----

pub const CALENDAR_DAYS: usize = 14;

const CONTENT_ROTATION: &[(&str, &str, &str)] = &[
    ("TikTok Video", "TikTok", "7:00 PM"),
    ("Instagram Reel", "Instagram", "8:00 PM"),
    ("TikTok Video", "TikTok", "12:00 PM"),
    ("Twitter Thread", "Twitter/X", "10:00 AM"),
    ("Instagram Story", "Instagram", "9:00 PM"),
    ("TikTok Video", "TikTok", "6:00 PM"),
    ("Reddit Post", "Reddit", "11:00 AM"),
];

#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub date: String,
    pub day_num: usize,
    pub platform: String,
    pub content_type: String,
    pub posting_time: String,
    pub product: String,
    pub product_id: String,
    pub status: String,
}

/// Two weeks of scheduled posts, rotating through content types and
/// products.
pub fn build_content_calendar(
    start: DateTime<Utc>,
    products: &[Product],
    days: usize,
) -> Vec<CalendarEntry> {
    (0..days)
        .map(|i| {
            let day = start + Duration::days(i as i64);
            let (content_type, platform, time) = CONTENT_ROTATION[i % CONTENT_ROTATION.len()];
            let product = &products[i % products.len()];
            CalendarEntry {
                date: day.format("%A, %B %d").to_string(),
                day_num: i + 1,
                platform: platform.into(),
                content_type: content_type.into(),
                posting_time: time.into(),
                product: product.name.into(),
                product_id: product.id.into(),
                status: "Scheduled".into(),
            }
        })
        .collect()
}

pub fn render_calendar(entries: &[CalendarEntry]) -> String {
    let mut text = format!("SELLBUDDY 2-WEEK CONTENT CALENDAR\n{}\n\n", "=".repeat(50));
    for day in entries {
        text.push_str(&format!(
            "\nDay {} - {}\nPlatform: {}\nContent: {}\nTime: {}\nProduct: {}\nStatus: {}\n---\n",
            day.day_num,
            day.date,
            day.platform,
            day.content_type,
            day.posting_time,
            day.product,
            day.status
        ));
    }
    text
}

#[derive(Serialize)]
struct MarketingSummary<'a> {
    generated: DateTime<Utc>,
    calendar: &'a [CalendarEntry],
    products: Vec<&'a str>,
}

/// Generate all content artifacts: one text bundle per product, the calendar
/// text, and a JSON summary. Returns the written paths.
pub fn generate_all(
    products: &[Product],
    content_dir: &Path,
    rng: &mut impl Rng,
) -> MarketingResult<Vec<PathBuf>> {
    std::fs::create_dir_all(content_dir)?;
    let mut written = Vec::new();

    for product in products {
        let bundle = format!(
            "{}\n\n{}\n\n{}\n\n{}",
            generate_tiktok_script(product, rng),
            generate_instagram_content(product),
            generate_reddit_strategy(product),
            generate_twitter_thread(product),
        );
        let path = content_dir.join(format!("{}_content.txt", product.id));
        std::fs::write(&path, bundle)?;
        info!(path = %path.display(), "content bundle written");
        written.push(path);
    }

    let calendar = build_content_calendar(Utc::now(), products, CALENDAR_DAYS);
    let calendar_path = content_dir.join("content_calendar.txt");
    std::fs::write(&calendar_path, render_calendar(&calendar))?;
    written.push(calendar_path);

    let summary = MarketingSummary {
        generated: Utc::now(),
        calendar: &calendar,
        products: products.iter().map(|p| p.id).collect(),
    };
    let json_path = content_dir.join("marketing_content.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&summary)?)?;
    written.push(json_path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{GALAXY_STAR_PROJECTOR, LED_STRIP_LIGHTS};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fill_placeholders_substitutes_all_keys() {
        let out = fill_placeholders(
            "The thing nobody tells you about {product}, every {demographic} with {problem}",
            "Galaxy Star Projector Pro",
            "a boring room",
            "gamer",
        );
        assert_eq!(
            out,
            "The thing nobody tells you about Galaxy Star Projector Pro, every gamer with a boring room"
        );
    }

    #[test]
    fn test_fill_placeholders_leaves_plain_text_alone() {
        assert_eq!(
            fill_placeholders("3AM purchase but it actually slaps", "x", "y", "z"),
            "3AM purchase but it actually slaps"
        );
    }

    #[test]
    fn test_pick_hook_never_leaves_placeholders() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let (_, hook) = pick_hook(&GALAXY_STAR_PROJECTOR, &mut rng);
            assert!(!hook.contains('{'), "unfilled placeholder in: {}", hook);
        }
    }

    #[test]
    fn test_unknown_caption_style_falls_back() {
        let fallback = generate_caption(&LED_STRIP_LIGHTS, "no-such-style");
        let curiosity = generate_caption(&LED_STRIP_LIGHTS, "curiosity");
        assert_eq!(fallback, curiosity);
    }

    #[test]
    fn test_unknown_niche_falls_back_to_generic_hashtags() {
        assert_eq!(niche_hashtags("hoverboard").to_vec(), vec!["#fyp", "#viral"]);
    }

    #[test]
    fn test_tiktok_script_mentions_price_and_hashtags() {
        let mut rng = StdRng::seed_from_u64(42);
        let script = generate_tiktok_script(&GALAXY_STAR_PROJECTOR, &mut rng);
        assert!(script.contains("Only $34.99 - Link in bio"));
        assert!(script.contains("#galaxyprojector"));
        assert!(script.contains("SUGGESTED SOUND:"));
    }

    #[test]
    fn test_calendar_has_requested_length_and_rotation() {
        let start = Utc::now();
        let calendar = build_content_calendar(start, Product::supported(), CALENDAR_DAYS);
        assert_eq!(calendar.len(), 14);
        assert_eq!(calendar[0].day_num, 1);
        assert_eq!(calendar[13].day_num, 14);
        // rotation wraps: day 8 repeats day 1's slot
        assert_eq!(calendar[7].content_type, calendar[0].content_type);
        assert_eq!(calendar[7].posting_time, calendar[0].posting_time);
        assert!(calendar.iter().all(|e| e.status == "Scheduled"));
    }

    #[test]
    fn test_generate_all_writes_per_product_and_calendar_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let written = generate_all(Product::supported(), dir.path(), &mut rng).unwrap();

        // one bundle per product + calendar + json summary
        assert_eq!(written.len(), Product::supported().len() + 2);
        assert!(dir.path().join("galaxy-star-projector_content.txt").exists());
        assert!(dir.path().join("content_calendar.txt").exists());

        let raw = std::fs::read_to_string(dir.path().join("marketing_content.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["calendar"].as_array().unwrap().len(), 14);
        assert_eq!(
            parsed["products"].as_array().unwrap().len(),
            Product::supported().len()
        );
    }
}
