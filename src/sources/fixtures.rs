//! Static data served by the mock backend.
//!
//! Listings, rooms and guides describe student housing in Copenhagen.

use crate::models::{
    ChatRoom, Coordinates, Message, MessageStatus, Notification, NotificationPayload, Property,
    Resource, ResourceCategory, Role, RoomType, User,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Account used by the demo login
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";

const ANA_AVATAR: &str = "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=crop&w=400&q=80";

fn at(date: &str, time: (u32, u32)) -> DateTime<Utc> {
    day(date)
        .and_hms_opt(time.0, time.1, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// The signed-in student of the mock session
pub fn current_user() -> User {
    User {
        id: "1".to_string(),
        name: "Ana Rodriguez".to_string(),
        email: "ana.rodriguez@example.com".to_string(),
        avatar: Some(ANA_AVATAR.to_string()),
        is_verified: true,
        role: Role::Student,
        created_at: at("2023-01-15", (10, 0)),
    }
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: None,
        is_verified: true,
        role,
        created_at: at("2023-02-01", (12, 0)),
    }
}

fn priya() -> User {
    user("2", "Priya Sharma", "priya.sharma@example.com", Role::Student)
}

fn lukas() -> User {
    user("3", "Lukas Schmidt", "lukas.schmidt@example.com", Role::Student)
}

fn sofie() -> User {
    user("4", "Sofie Jensen", "sofie.jensen@example.com", Role::Landlord)
}

fn tao() -> User {
    user("5", "Tao Chen", "tao.chen@example.com", Role::Landlord)
}

struct Listing<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    price: i64,
    deposit: i64,
    address: &'a str,
    city: &'a str,
    postal_code: &'a str,
    size: i32,
    rooms: u32,
    furnished: bool,
    available: (&'a str, Option<&'a str>),
    amenities: &'a [&'a str],
    landlord: User,
    rating: f32,
    coordinates: (f64, f64),
    distance: Option<f64>,
}

impl Listing<'_> {
    fn build(self) -> Property {
        Property {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            price: self.price,
            currency: "DKK".to_string(),
            deposit: self.deposit,
            address: self.address.to_string(),
            city: self.city.to_string(),
            postal_code: self.postal_code.to_string(),
            country: "Denmark".to_string(),
            size: self.size,
            rooms: self.rooms,
            furnished: self.furnished,
            available_from: day(self.available.0),
            available_to: self.available.1.map(day),
            images: vec![format!("https://images.example.com/listings/{}/1.jpg", self.id)],
            amenities: strings(self.amenities),
            landlord_id: self.landlord.id,
            landlord_name: self.landlord.name,
            landlord_avatar: self.landlord.avatar,
            landlord_rating: Some(self.rating),
            created_at: at("2023-06-01", (9, 0)),
            updated_at: at("2023-06-10", (9, 0)),
            coordinates: Some(Coordinates {
                latitude: self.coordinates.0,
                longitude: self.coordinates.1,
            }),
            distance: self.distance,
            is_favorite: false,
        }
    }
}

pub fn properties() -> Vec<Property> {
    vec![
        Listing {
            id: "1",
            title: "Modern Studio in Nørrebro",
            description: "Bright studio with a kitchenette, close to the lakes and Nørreport station.",
            price: 6500,
            deposit: 19500,
            address: "Jagtvej 113",
            city: "Copenhagen",
            postal_code: "2200",
            size: 32,
            rooms: 1,
            furnished: true,
            available: ("2023-08-01", None),
            amenities: &["Wi-Fi", "Washing machine", "Bike storage"],
            landlord: tao(),
            rating: 4.7,
            coordinates: (55.6951, 12.5489),
            distance: Some(2.1),
        }
        .build(),
        Listing {
            id: "2",
            title: "Bright 2-Bedroom Apartment in Vesterbro",
            description: "Renovated apartment with balcony, five minutes from Copenhagen Central.",
            price: 11200,
            deposit: 33600,
            address: "Istedgade 57",
            city: "Copenhagen",
            postal_code: "1650",
            size: 68,
            rooms: 3,
            furnished: false,
            available: ("2023-09-01", None),
            amenities: &["Balcony", "Dishwasher", "Elevator"],
            landlord: sofie(),
            rating: 4.4,
            coordinates: (55.6707, 12.5563),
            distance: Some(3.4),
        }
        .build(),
        Listing {
            id: "3",
            title: "Cozy Room in Shared Apartment",
            description: "Private room in a friendly shared flat with two other students.",
            price: 4200,
            deposit: 8400,
            address: "Gammel Kongevej 140",
            city: "Frederiksberg",
            postal_code: "1850",
            size: 14,
            rooms: 1,
            furnished: true,
            available: ("2023-07-15", Some("2024-06-30")),
            amenities: &["Wi-Fi", "Shared kitchen"],
            landlord: sofie(),
            rating: 4.4,
            coordinates: (55.6786, 12.5380),
            distance: Some(1.2),
        }
        .build(),
        Listing {
            id: "4",
            title: "Spacious Family Apartment in Østerbro",
            description: "Quiet three bedroom home near Fælledparken, suited for families or flatmates.",
            price: 16500,
            deposit: 49500,
            address: "Østerbrogade 88",
            city: "Copenhagen",
            postal_code: "2100",
            size: 110,
            rooms: 4,
            furnished: false,
            available: ("2023-10-01", None),
            amenities: &["Elevator", "Dishwasher", "Courtyard"],
            landlord: tao(),
            rating: 4.7,
            coordinates: (55.7060, 12.5776),
            distance: Some(4.8),
        }
        .build(),
        Listing {
            id: "5",
            title: "Student Room near DTU",
            description: "Compact room in a dormitory a short bike ride from campus.",
            price: 3600,
            deposit: 7200,
            address: "Akademivej 358",
            city: "Kongens Lyngby",
            postal_code: "2800",
            size: 12,
            rooms: 1,
            furnished: true,
            available: ("2023-08-15", Some("2024-07-31")),
            amenities: &["Wi-Fi", "Laundry room"],
            landlord: sofie(),
            rating: 4.1,
            coordinates: (55.7858, 12.5211),
            distance: None,
        }
        .build(),
        Listing {
            id: "6",
            title: "Furnished Studio in Amager",
            description: "Furnished studio by the metro with quick access to the University of Copenhagen South Campus.",
            price: 7400,
            deposit: 22200,
            address: "Amagerbrogade 210",
            city: "Copenhagen",
            postal_code: "2300",
            size: 36,
            rooms: 2,
            furnished: true,
            available: ("2023-09-15", None),
            amenities: &["Wi-Fi", "Metro nearby", "Bike storage"],
            landlord: tao(),
            rating: 4.7,
            coordinates: (55.6516, 12.6021),
            distance: Some(2.9),
        }
        .build(),
    ]
}

fn message(
    id: &str,
    room_id: &str,
    sender: &User,
    content: &str,
    created_at: DateTime<Utc>,
) -> Message {
    Message {
        id: id.to_string(),
        room_id: room_id.to_string(),
        sender_id: sender.id.clone(),
        sender_name: sender.name.clone(),
        sender_avatar: sender.avatar.clone(),
        content: content.to_string(),
        created_at,
        status: MessageStatus::Read,
    }
}

/// Messages per room id, oldest first
pub fn messages() -> HashMap<String, Vec<Message>> {
    let ana = current_user();
    let mut rooms = HashMap::new();

    rooms.insert(
        "1".to_string(),
        vec![
            message(
                "101",
                "1",
                &priya(),
                "Welcome to everyone who just arrived this semester!",
                at("2023-06-14", (8, 30)),
            ),
            message(
                "102",
                "1",
                &ana,
                "Thanks! Does anyone know where to get a CPR number quickly?",
                at("2023-06-14", (8, 45)),
            ),
            message(
                "103",
                "1",
                &priya(),
                "Book a slot at International House, it took me a week.",
                at("2023-06-14", (9, 5)),
            ),
        ],
    );
    rooms.insert(
        "3".to_string(),
        vec![message(
            "301",
            "3",
            &lukas(),
            "Anyone interested in joining a picnic at Frederiksberg Gardens this Saturday?",
            at("2023-06-13", (18, 20)),
        )],
    );
    rooms.insert(
        "4".to_string(),
        vec![
            message(
                "401",
                "4",
                &ana,
                "Hi Tao, is the studio in Nørrebro still available?",
                at("2023-06-15", (8, 40)),
            ),
            message(
                "402",
                "4",
                &tao(),
                "Yes it is, from the first of August.",
                at("2023-06-15", (8, 52)),
            ),
            message("403", "4", &ana, "Great, could I come and see it?", at("2023-06-15", (9, 0))),
            message(
                "404",
                "4",
                &tao(),
                "I can show you the apartment tomorrow at 3 PM if that works for you?",
                at("2023-06-15", (9, 10)),
            ),
        ],
    );

    rooms
}

fn last_of(messages: &HashMap<String, Vec<Message>>, room_id: &str) -> Option<Message> {
    messages.get(room_id).and_then(|room| room.last().cloned())
}

pub fn chat_rooms() -> Vec<ChatRoom> {
    let messages = messages();

    vec![
        ChatRoom {
            id: "4".to_string(),
            name: "Tao Chen".to_string(),
            description: None,
            room_type: RoomType::Direct,
            participants: vec![current_user(), tao()],
            last_message: last_of(&messages, "4"),
            unread_count: 1,
            created_at: at("2023-06-15", (8, 40)),
            updated_at: at("2023-06-15", (9, 10)),
            avatar: None,
        },
        ChatRoom {
            id: "1".to_string(),
            name: "International Students Copenhagen".to_string(),
            description: Some("Questions and tips for newcomers".to_string()),
            room_type: RoomType::Group,
            participants: vec![current_user(), priya(), lukas()],
            last_message: last_of(&messages, "1"),
            unread_count: 2,
            created_at: at("2023-01-20", (10, 0)),
            updated_at: at("2023-06-14", (9, 5)),
            avatar: None,
        },
        ChatRoom {
            id: "3".to_string(),
            name: "Frederiksberg Neighbours".to_string(),
            description: Some("Events around Frederiksberg".to_string()),
            room_type: RoomType::Group,
            participants: vec![current_user(), lukas()],
            last_message: last_of(&messages, "3"),
            unread_count: 0,
            created_at: at("2023-03-02", (16, 0)),
            updated_at: at("2023-06-13", (18, 20)),
            avatar: None,
        },
        ChatRoom {
            id: "2".to_string(),
            name: "Nørrebro Housing Swap".to_string(),
            description: Some("Room swaps and sublets in Nørrebro".to_string()),
            room_type: RoomType::Group,
            participants: vec![current_user(), priya()],
            last_message: None,
            unread_count: 0,
            created_at: at("2023-05-11", (11, 0)),
            updated_at: at("2023-05-11", (11, 0)),
            avatar: None,
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    let notification =
        |id: &str, title: &str, body: &str, read: bool, payload, created_at| Notification {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            read,
            payload,
            created_at,
        };

    vec![
        notification(
            "1",
            "New Message",
            "Tao Chen: I can show you the apartment tomorrow at 3 PM if that works for you?",
            false,
            NotificationPayload::Message {
                room_id: "4".to_string(),
                message_id: "404".to_string(),
            },
            at("2023-06-15", (9, 10)),
        ),
        notification(
            "2",
            "Deposit Payment Confirmed",
            "Your deposit payment for 'Modern Studio in Nørrebro' has been confirmed and is now in escrow.",
            true,
            NotificationPayload::Payment {
                property_id: "1".to_string(),
                payment_id: "p1".to_string(),
            },
            at("2023-06-14", (14, 30)),
        ),
        notification(
            "3",
            "New Property Match",
            "We found a new property that matches your search criteria: 'Cozy Room in Shared Apartment'",
            true,
            NotificationPayload::Property {
                property_id: "3".to_string(),
            },
            at("2023-06-13", (10, 15)),
        ),
        notification(
            "4",
            "Identity Verification Successful",
            "Your identity has been successfully verified. You can now access all features of the platform.",
            true,
            NotificationPayload::System,
            at("2023-06-12", (16, 45)),
        ),
        notification(
            "5",
            "New Group Message",
            "Lukas Schmidt: Anyone interested in joining a picnic at Frederiksberg Gardens this Saturday?",
            true,
            NotificationPayload::Message {
                room_id: "3".to_string(),
                message_id: "301".to_string(),
            },
            at("2023-06-13", (18, 20)),
        ),
    ]
}

pub fn resource_categories() -> Vec<ResourceCategory> {
    [
        ("1", "Housing", "Home", "Information about finding and renting housing in Denmark"),
        (
            "2",
            "Visa & Residence",
            "FileCheck",
            "Guides for visa applications and residence permits",
        ),
        ("3", "Healthcare", "Stethoscope", "Information about the Danish healthcare system"),
        (
            "4",
            "Education",
            "GraduationCap",
            "Resources for students at Danish educational institutions",
        ),
        ("5", "Transportation", "Bus", "Information about public transportation in Denmark"),
        ("6", "Banking & Finance", "Wallet", "Guides for banking and financial matters in Denmark"),
    ]
    .into_iter()
    .map(|(id, name, icon, description)| ResourceCategory {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: Some(description.to_string()),
    })
    .collect()
}

pub fn resources() -> Vec<Resource> {
    let categories = resource_categories();
    let category_name = |id: &str| {
        categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.clone())
            .unwrap_or_default()
    };

    [
        (
            "1",
            "Understanding Danish Rental Contracts",
            "A comprehensive guide to Danish rental contracts and tenant rights",
            "# Understanding Danish Rental Contracts\n\nMost contracts are unlimited. Landlords may charge up to 3 months' rent as a deposit and up to 3 months' rent as prepaid rent.",
            "1",
            at("2023-01-15", (10, 0)),
        ),
        (
            "2",
            "Student Residence Permit Guide",
            "Step-by-step guide to applying for a student residence permit in Denmark",
            "# Student Residence Permit\n\nApply through SIRI before arrival. Bring your admission letter and proof of funds.",
            "2",
            at("2023-01-10", (14, 30)),
        ),
        (
            "3",
            "Danish Healthcare System for International Students",
            "Overview of healthcare access and services for international students in Denmark",
            "# Healthcare\n\nThe yellow health card shows your name, address, CPR number and your assigned general practitioner (GP).",
            "3",
            at("2023-01-05", (9, 15)),
        ),
        (
            "4",
            "Public Transportation in Copenhagen",
            "Guide to navigating Copenhagen's public transportation system",
            "# Getting Around\n\nThe Rejsekort travel card works on metro, S-trains and buses. Cycling is often fastest.",
            "5",
            at("2023-01-02", (11, 45)),
        ),
        (
            "5",
            "Banking in Denmark for International Students",
            "How to open a bank account and manage finances as an international student",
            "# Banking\n\nYou need a CPR number to open an account. Register your NemKonto to receive payments from public authorities.",
            "6",
            at("2022-12-28", (16, 20)),
        ),
    ]
    .into_iter()
    .map(|(id, title, description, content, category_id, created_at)| Resource {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        content: content.to_string(),
        category_id: category_id.to_string(),
        category_name: category_name(category_id),
        thumbnail: None,
        created_at,
        updated_at: created_at,
    })
    .collect()
}
