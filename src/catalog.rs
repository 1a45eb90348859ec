//! Animal and food catalog
//!
//! Immutable tables defined at process start. Everything else refers to
//! catalog entries by identifier (`"bear"`, `"donut"`, ...) so the persisted
//! configuration stays a plain list of strings.

use sdl2::pixels::Color;

/// An animal that can appear as a feeding target
#[derive(Debug, PartialEq)]
pub struct Animal {
    pub id: &'static str,
    pub name: &'static str,
    /// Image shown before the animal has eaten (mouth open)
    pub neutral_image: &'static str,
    /// Image shown once the animal has eaten
    pub happy_image: &'static str,
    pub sound: &'static str,
    /// Fill colour used when the image is missing
    pub placeholder: Color,
}

/// A food that the tray hands out
#[derive(Debug, PartialEq)]
pub struct FoodType {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub placeholder: Color,
}

pub const DEFAULT_ANIMAL: &str = "bear";
pub const DEFAULT_FOOD: &str = "donut";

pub static ANIMALS: [Animal; 5] = [
    Animal {
        id: "bear",
        name: "BEAR",
        neutral_image: "assets/images/bear_open.png",
        happy_image: "assets/images/bear_happy.png",
        sound: "assets/sounds/bear.wav",
        placeholder: Color::RGB(150, 100, 60),
    },
    Animal {
        id: "cat",
        name: "CAT",
        neutral_image: "assets/images/cat_open.png",
        happy_image: "assets/images/cat_happy.png",
        sound: "assets/sounds/cat.wav",
        placeholder: Color::RGB(240, 170, 80),
    },
    Animal {
        id: "dog",
        name: "DOG",
        neutral_image: "assets/images/dog_open.png",
        happy_image: "assets/images/dog_happy.png",
        sound: "assets/sounds/dog.wav",
        placeholder: Color::RGB(200, 160, 120),
    },
    Animal {
        id: "lion",
        name: "LION",
        neutral_image: "assets/images/lion_open.png",
        happy_image: "assets/images/lion_happy.png",
        sound: "assets/sounds/lion.wav",
        placeholder: Color::RGB(230, 190, 40),
    },
    Animal {
        id: "panda",
        name: "PANDA",
        neutral_image: "assets/images/panda_open.png",
        happy_image: "assets/images/panda_happy.png",
        sound: "assets/sounds/panda.wav",
        placeholder: Color::RGB(235, 235, 235),
    },
];

pub static FOOD_TYPES: [FoodType; 4] = [
    FoodType {
        id: "donut",
        name: "DONUT",
        image: "assets/images/donut.png",
        placeholder: Color::RGB(240, 130, 180),
    },
    FoodType {
        id: "apple",
        name: "APPLE",
        image: "assets/images/apple.png",
        placeholder: Color::RGB(220, 40, 40),
    },
    FoodType {
        id: "banana",
        name: "BANANA",
        image: "assets/images/banana.png",
        placeholder: Color::RGB(250, 220, 60),
    },
    FoodType {
        id: "fish",
        name: "FISH",
        image: "assets/images/fish.png",
        placeholder: Color::RGB(90, 150, 220),
    },
];

/// Looks up an animal by identifier
pub fn animal(id: &str) -> Option<&'static Animal> {
    ANIMALS.iter().find(|a| a.id == id)
}

/// Looks up a food type by identifier
pub fn food_type(id: &str) -> Option<&'static FoodType> {
    FOOD_TYPES.iter().find(|f| f.id == id)
}

/// Food type for `id`, or the default food when `id` is unknown
pub fn food_type_or_default(id: &str) -> &'static FoodType {
    food_type(id).unwrap_or(&FOOD_TYPES[0])
}

/// All animal identifiers in catalog order
pub fn animal_ids() -> Vec<String> {
    ANIMALS.iter().map(|a| a.id.to_string()).collect()
}
