diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password -> Varchar,
        #[max_length = 50]
        phone -> Nullable<Varchar>,
        #[max_length = 255]
        location -> Nullable<Varchar>,
        #[max_length = 255]
        occupation -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        #[max_length = 20]
        role -> Varchar,
        #[max_length = 255]
        reset_token -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    areas (id) {
        id -> Int4,
        #[max_length = 100]
        name -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 255]
        video_link -> Nullable<Varchar>,
    }
}

diesel::table! {
    comments (id) {
        id -> Int4,
        content -> Text,
        user_id -> Int4,
        area_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    contents (id) {
        id -> Int4,
        #[max_length = 255]
        title -> Varchar,
        #[max_length = 100]
        category -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(comments -> users (user_id));
diesel::joinable!(comments -> areas (area_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    areas,
    comments,
    contents,
);
