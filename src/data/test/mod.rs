use crate::{
    data::{admin::AdminRepository, channel_config::ChannelConfigRepository, store::JsonStore},
    error::{room::RoomError, AppError},
    model::{
        admin::AdminDocument,
        document::{BaseChannel, BaseChannelConfig, ChannelsDocument, CustomBaseConfig},
    },
};
use serde_json::json;
use test_utils::{builder::TestBuilder, error::TestError};
