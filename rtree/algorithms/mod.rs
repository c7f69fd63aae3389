// R-tree算法模块
//
// 这个模块包含R-tree的所有核心算法实现，按功能分解为不同的子模块：
// - bulk_load: 批量构建算法（OMT、STR、Hilbert/Morton 曲线排序、nearest-X）
// - partition: 按组部分排序，构建算法共用
// - curve: Hilbert / Morton 曲线编码
// - traverse: 通用遍历（迭代 / 递归）
// - search: 搜索和查询算法
// - debug: 结构校验、统计和调试输出
// - export: JSON 可视化导出

pub mod bulk_load;
pub mod curve;
pub mod debug;
pub mod export;
pub mod partition;
pub mod search;
pub mod traverse;
