//! Built-in mock dataset for the in-memory store.
//!
//! Four users, one feed each, and a single status update on John Vilk's
//! feed with two likes and two comments.

use serde_json::{json, Value};

pub fn mock_dataset() -> Value {
    json!({
        "users": {
            "1": { "fullName": "Someone", "feed": 1 },
            "2": { "fullName": "Someone Else", "feed": 2 },
            "3": { "fullName": "Another Person", "feed": 3 },
            "4": { "fullName": "John Vilk", "feed": 4 }
        },
        "feeds": {
            "1": { "contents": [] },
            "2": { "contents": [] },
            "3": { "contents": [] },
            "4": { "contents": [1] }
        },
        "feedItems": {
            "1": {
                "likeCounter": [2, 3],
                "type": "statusUpdate",
                "contents": {
                    "author": 1,
                    "postDate": 1453668480000i64,
                    "location": "Austin, TX",
                    "contents": "ugh.",
                    "likeCounter": []
                },
                "comments": [
                    {
                        "author": 2,
                        "postDate": 1453690800000i64,
                        "contents": "hope everything is ok!"
                    },
                    {
                        "author": 3,
                        "postDate": 1453690800000i64,
                        "contents": "sending hugs your way"
                    }
                ]
            }
        }
    })
}
