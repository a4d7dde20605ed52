use std::collections::BTreeSet;

use chrono::NaiveDate;

use gramstay::listings::domain::{
    GeoPoint, Listing, ListingId, ListingStatus, OwnerProfile, PropertyType, Review,
};

fn amenities(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Demo catalog mirroring the marketplace's launch listings. Used by the
/// in-memory repository for `serve`, `search`, and `demo` runs.
pub(crate) fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: ListingId("room-0001".to_string()),
            title: "Cozy Single Room near College".to_string(),
            description: "A bright and airy single room available for students. Fully \
                          furnished with a bed, study table, and wardrobe; kitchen and \
                          bathroom shared with other tenants."
                .to_string(),
            location: "Chandpur, Rajasthan".to_string(),
            property_type: PropertyType::Room,
            price: 5000,
            status: ListingStatus::Available,
            rating: 4.5,
            image_url: "https://images.gramstay.local/room-0001/cover.jpg".to_string(),
            images: vec![
                "https://images.gramstay.local/room-0001/cover.jpg".to_string(),
                "https://images.gramstay.local/room-0001/desk.jpg".to_string(),
            ],
            is_verified: true,
            amenities: amenities(&["WiFi", "Study Table", "Wardrobe", "Power Backup", "Water Supply"]),
            owner: Some(OwnerProfile {
                name: "Rahul Singh".to_string(),
                phone: "9876543210".to_string(),
                is_verified: true,
                rating: 4.8,
            }),
            geo: Some(GeoPoint {
                latitude: 26.5123,
                longitude: 74.3021,
                accuracy: None,
            }),
            reviews: vec![
                Review {
                    reviewer: "Amit Kumar".to_string(),
                    rating: 4.5,
                    comment: "Great place for students; the landlord is helpful.".to_string(),
                    date: date(2023, 10, 15),
                },
                Review {
                    reviewer: "Priya Sharma".to_string(),
                    rating: 4.0,
                    comment: "Good value for money, close to the market.".to_string(),
                    date: date(2023, 9, 22),
                },
            ],
            user_id: "owner-0001".to_string(),
        },
        Listing {
            id: ListingId("room-0002".to_string()),
            title: "Spacious PG with Meals".to_string(),
            description: "Fully furnished PG accommodation with three meals included and \
                          an attached bathroom. Common dining area and recreation zone."
                .to_string(),
            location: "Bhiwani, Haryana".to_string(),
            property_type: PropertyType::Pg,
            price: 8000,
            status: ListingStatus::Available,
            rating: 4.2,
            image_url: "https://images.gramstay.local/room-0002/cover.jpg".to_string(),
            images: vec!["https://images.gramstay.local/room-0002/cover.jpg".to_string()],
            is_verified: true,
            amenities: amenities(&["3 Meals Daily", "WiFi", "Power Backup", "Attached Bathroom", "Laundry"]),
            owner: Some(OwnerProfile {
                name: "Suman Devi".to_string(),
                phone: "9765432180".to_string(),
                is_verified: true,
                rating: 4.5,
            }),
            geo: Some(GeoPoint {
                latitude: 28.7938,
                longitude: 76.1323,
                accuracy: None,
            }),
            reviews: vec![Review {
                reviewer: "Rajesh Verma".to_string(),
                rating: 4.2,
                comment: "Food is good and rooms are clean.".to_string(),
                date: date(2023, 11, 5),
            }],
            user_id: "owner-0002".to_string(),
        },
        Listing {
            id: ListingId("room-0003".to_string()),
            title: "2BHK with Modern Amenities".to_string(),
            description: "Spacious 2BHK apartment perfect for sharing, with an equipped \
                          kitchen and a balcony with a scenic view."
                .to_string(),
            location: "Nainital Outskirts, Uttarakhand".to_string(),
            property_type: PropertyType::Apartment,
            price: 12000,
            status: ListingStatus::Soon,
            rating: 4.8,
            image_url: "https://images.gramstay.local/room-0003/cover.jpg".to_string(),
            images: vec!["https://images.gramstay.local/room-0003/cover.jpg".to_string()],
            is_verified: false,
            amenities: amenities(&["Fully Furnished", "Kitchen", "Hot Water", "Mountain View", "Parking"]),
            owner: Some(OwnerProfile {
                name: "Vikram Joshi".to_string(),
                phone: "8765432190".to_string(),
                is_verified: false,
                rating: 4.3,
            }),
            geo: Some(GeoPoint {
                latitude: 29.3803,
                longitude: 79.4636,
                accuracy: None,
            }),
            reviews: Vec::new(),
            user_id: "owner-0003".to_string(),
        },
        Listing {
            id: ListingId("room-0004".to_string()),
            title: "Traditional Rural Cottage".to_string(),
            description: "Traditional cottage with modern comforts, surrounded by \
                          farmland. Single bedroom, living area, and kitchenette."
                .to_string(),
            location: "Palakkad, Kerala".to_string(),
            property_type: PropertyType::House,
            price: 7500,
            status: ListingStatus::Available,
            rating: 4.6,
            image_url: "https://images.gramstay.local/room-0004/cover.jpg".to_string(),
            images: vec!["https://images.gramstay.local/room-0004/cover.jpg".to_string()],
            is_verified: true,
            amenities: amenities(&["Garden", "Kitchenette", "WiFi", "Natural Ventilation"]),
            owner: Some(OwnerProfile {
                name: "Lakshmi Nair".to_string(),
                phone: "7654321890".to_string(),
                is_verified: true,
                rating: 4.9,
            }),
            geo: Some(GeoPoint {
                latitude: 10.7867,
                longitude: 76.6609,
                accuracy: None,
            }),
            reviews: vec![Review {
                reviewer: "Vishnu Menon".to_string(),
                rating: 4.9,
                comment: "A perfect blend of traditional living and modern comforts.".to_string(),
                date: date(2023, 11, 2),
            }],
            user_id: "owner-0004".to_string(),
        },
    ]
}
