//! Diesel schema for the messaging tables.

diesel::table! {
    /// Account records.
    users (user_id) {
        /// User identifier.
        user_id -> Uuid,
        /// Given name.
        #[max_length = 150]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 150]
        last_name -> Varchar,
        /// Unique email address.
        #[max_length = 254]
        email -> Varchar,
        /// Opaque credential digest.
        #[max_length = 255]
        password_hash -> Varchar,
        /// Optional phone number.
        #[max_length = 30]
        phone_number -> Nullable<Varchar>,
        /// Account role (guest, host, or admin).
        #[max_length = 10]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Messages authored by a single user.
    messages (message_id) {
        /// Message identifier.
        message_id -> Uuid,
        /// Authoring user.
        sender_id -> Uuid,
        /// Message text.
        message_body -> Text,
        /// Send timestamp.
        sent_at -> Timestamptz,
    }
}

diesel::table! {
    /// Conversation records.
    conversations (conversation_id) {
        /// Conversation identifier.
        conversation_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Conversation membership join records.
    conversations_participants (conversation_id, user_id) {
        /// Conversation the user belongs to.
        conversation_id -> Uuid,
        /// Participating user.
        user_id -> Uuid,
    }
}

diesel::joinable!(messages -> users (sender_id));
diesel::joinable!(conversations_participants -> conversations (conversation_id));
diesel::joinable!(conversations_participants -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    messages,
    conversations,
    conversations_participants,
);

/// Primary key constraint on `users`.
pub const USERS_PKEY: &str = "users_pkey";
/// Unique index on `users.email`.
pub const USERS_EMAIL_INDEX: &str = "idx_users_email";
/// Primary key constraint on `messages`.
pub const MESSAGES_PKEY: &str = "messages_pkey";
/// Foreign key from `messages.sender_id` to `users`.
pub const MESSAGES_SENDER_FKEY: &str = "messages_sender_id_fkey";
/// Primary key constraint on `conversations`.
pub const CONVERSATIONS_PKEY: &str = "conversations_pkey";
/// Foreign key from the join table to `conversations`.
pub const PARTICIPANTS_CONVERSATION_FKEY: &str =
    "conversations_participants_conversation_id_fkey";
/// Foreign key from the join table to `users`.
pub const PARTICIPANTS_USER_FKEY: &str = "conversations_participants_user_id_fkey";
