/// A generated dating profile. Everything except the photo cursor is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub city: String,
    pub title: String,
    pub bio: String,
    pub tags: Vec<String>,
    photos: Vec<String>,
    photo_index: usize,
}

/// The fixed part of a profile, built with a struct literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileInfo {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub city: String,
    pub title: String,
    pub bio: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoView<'a> {
    pub src: &'a str,
    pub index: usize,
    pub total: usize,
}

impl Profile {
    /// Returns `None` when `photos` is empty.
    pub fn new(info: ProfileInfo, photos: Vec<String>) -> Option<Self> {
        if photos.is_empty() {
            return None;
        }

        let ProfileInfo {
            id,
            name,
            age,
            city,
            title,
            bio,
            tags,
        } = info;

        Some(Self {
            id,
            name,
            age,
            city,
            title,
            bio,
            tags,
            photos,
            photo_index: 0,
        })
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn photo_index(&self) -> usize {
        self.photo_index % self.photos.len()
    }

    pub fn current_photo(&self) -> PhotoView<'_> {
        let index = self.photo_index();
        PhotoView {
            src: &self.photos[index],
            index,
            total: self.photos.len(),
        }
    }

    /// Advances the cursor, wrapping at the end. Returns the new index, or `None` when
    /// there is nothing to cycle to.
    pub fn advance_photo(&mut self) -> Option<usize> {
        if self.photos.len() < 2 {
            return None;
        }
        self.photo_index = (self.photo_index() + 1) % self.photos.len();
        Some(self.photo_index)
    }

    pub fn alt_text(&self) -> String {
        let photo = self.current_photo();
        format!(
            "{} — profile photo {} of {}",
            self.name,
            photo.index + 1,
            photo.total
        )
    }

    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.title, self.city)
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(id: &str, photo_count: usize) -> Profile {
    let photos = (0..photo_count)
        .map(|i| format!("https://example.test/{id}/{i}.jpg"))
        .collect();
    let info = ProfileInfo {
        id: id.to_string(),
        name: "Alex".to_string(),
        age: 27,
        city: "Brooklyn".to_string(),
        title: "Barista".to_string(),
        bio: "Will beat you at Mario Kart.".to_string(),
        tags: vec!["Coffee".to_string(), "Cats".to_string(), "Books".to_string()],
    };
    Profile::new(info, photos).expect("sample profile has photos")
}
