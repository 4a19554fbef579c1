pub mod create_user_dto;
pub mod permission_dto;
pub mod role_dto;
