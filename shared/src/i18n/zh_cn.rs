#![allow(missing_docs, reason = "plain string tables")]

pub mod toggle {
    pub const LIKE_FAILED: &str = "点赞失败, 请稍后再试";
    pub const COLLECT_FAILED: &str = "收藏失败, 请稍后再试";
    pub const FOLLOW_FAILED: &str = "关注失败, 请稍后再试";

    pub const FOLLOWED_LABEL: &str = "已关注TA";
    pub const FOLLOW_LABEL: &str = "关注TA";
}

pub mod comment {
    pub const SUBMIT_FAILED: &str = "评论失败, 请稍后再试";
}

pub mod share {
    pub const QR_FALLBACK_TEXT: &str = "分享链接";
}
