diesel::table! {
    notes (id) {
        id -> Text,
        content -> Text,
        expire_after_read -> Bool,
        password -> Nullable<Text>,
        created_at -> Timestamp,
    }
}
