use crate::profile::{Profile, ProfileInfo};
use rand::seq::SliceRandom;
use rand::Rng;

const TAGS: &[&str] = &[
    "Coffee",
    "Hiking",
    "Movies",
    "Live Music",
    "Board Games",
    "Cats",
    "Dogs",
    "Traveler",
    "Foodie",
    "Tech",
    "Art",
    "Runner",
    "Climbing",
    "Books",
    "Yoga",
    "Photography",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Sam", "Jordan", "Taylor", "Casey", "Avery", "Riley", "Morgan", "Quinn", "Cameron",
    "Jamie", "Drew", "Parker", "Reese", "Emerson", "Rowan", "Shawn", "Harper", "Skyler", "Devon",
];

const CITIES: &[&str] = &[
    "Brooklyn",
    "Manhattan",
    "Queens",
    "Jersey City",
    "Hoboken",
    "Astoria",
    "Williamsburg",
    "Bushwick",
    "Harlem",
    "Lower East Side",
];

const JOBS: &[&str] = &[
    "Product Designer",
    "Software Engineer",
    "Data Analyst",
    "Barista",
    "Teacher",
    "Photographer",
    "Architect",
    "Chef",
    "Nurse",
    "Marketing Manager",
    "UX Researcher",
];

const BIOS: &[&str] = &[
    "Weekend hikes and weekday lattes.",
    "Dog parent. Amateur chef. Karaoke enthusiast.",
    "Trying every taco in the city, for science.",
    "Bookstore browser and movie quote machine.",
    "Gym sometimes, Netflix always.",
    "Looking for the best slice in town.",
    "Will beat you at Mario Kart.",
    "Currently planning the next trip.",
];

pub const PHOTO_SEEDS: &[&str] = &[
    "1515462277126-2b47b9fa09e6",
    "1520975916090-3105956dac38",
    "1519340241574-2cec6aef0c01",
    "1554151228-14d9def656e4",
    "1548142813-c348350df52b",
    "1517841905240-472988babdf9",
    "1535713875002-d1d0cf377fde",
    "1545996124-0501ebae84d0",
    "1524504388940-b1c1722653e1",
    "1531123897727-8f129e1688ce",
];

const MIN_AGE: u8 = 18;
const MAX_AGE: u8 = 39;

pub fn image_url(seed: &str) -> String {
    format!(
        "https://images.unsplash.com/photo-{}?auto=format&fit=crop&w=1200&q=80",
        seed
    )
}

/// Builds a fresh batch of `count` profiles. Ids are unique within the batch.
pub fn generate_profiles(
    count: usize,
    photos_per_profile: usize,
    rng: &mut impl Rng,
) -> Vec<Profile> {
    let batch: u32 = rng.gen();
    let photo_count = photos_per_profile.clamp(1, PHOTO_SEEDS.len());

    let mut profiles = Vec::with_capacity(count);
    for index in 0..count {
        let photos = pick_photos(photo_count, rng);
        let info = ProfileInfo {
            id: format!("p_{}_{:x}", index, batch),
            name: pick(FIRST_NAMES, rng),
            age: rng.gen_range(MIN_AGE..=MAX_AGE),
            city: pick(CITIES, rng),
            title: pick(JOBS, rng),
            bio: pick(BIOS, rng),
            tags: pick_tags(rng),
        };
        let profile = Profile::new(info, photos);
        // photo_count is at least one, so construction cannot fail
        if let Some(profile) = profile {
            profiles.push(profile);
        }
    }
    profiles
}

fn pick(pool: &[&str], rng: &mut impl Rng) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

fn pick_tags(rng: &mut impl Rng) -> Vec<String> {
    let amount = rng.gen_range(3..=4);
    TAGS.choose_multiple(rng, amount)
        .map(|tag| tag.to_string())
        .collect()
}

fn pick_photos(count: usize, rng: &mut impl Rng) -> Vec<String> {
    PHOTO_SEEDS
        .choose_multiple(rng, count)
        .map(|seed| image_url(seed))
        .collect()
}
