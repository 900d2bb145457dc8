use uuid::Uuid;

pub fn get_uuid() -> Uuid {
    Uuid::new_v4()
}
