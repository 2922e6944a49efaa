//! EduPortal - 教育门户后端服务
//!
//! 基于 Actix Web 构建的角色制作业平台，核心是由 AI 导入和评分的动态工作表。
//!
//! # 架构
//! - `cache`: 缓存层（Moka），保存登录会话
//! - `collaborators`: 外部协作方（评分 / PDF 导入 / 答疑 / 学情分析）及其调用策略
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `worksheet`: 工作表结构、答案、渲染、会话与提交组装

pub mod cache;
pub mod collaborators;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod worksheet;
