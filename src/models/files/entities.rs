use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已保存到上传目录的文件引用（作业附件 PDF、视频作业）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct UploadedFile {
    // 磁盘上的文件名（uuid + 扩展名）
    pub stored_name: String,
    // 用户上传时的原始文件名
    pub original_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 小写的扩展名，例如 ".pdf"
    pub file_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
