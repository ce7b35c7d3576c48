//! Data-access-binding generator.
//!
//! One generic repository factory plus one concrete binding per table.
//! The factory is the contract the rest of the application builds on:
//! fetch-all, fetch-by-identifier (null on miss), create, update and
//! delete, each table-scoped.

use heck::{ToLowerCamelCase, ToPascalCase};

use crate::model::SchemaModel;

use super::GENERATED_HEADER;

const FACTORY: &str = r#"export interface DbClient {
  query(text: string, params?: unknown[]): Promise<{ rows: unknown[] }>;
}

export function createRepository<
  Row,
  Insert extends Record<string, unknown>,
  Update extends Record<string, unknown>,
>(client: DbClient, table: string, idColumn: string) {
  return {
    async findAll(): Promise<Row[]> {
      const res = await client.query(`select * from "${table}"`);
      return res.rows as Row[];
    },
    async findById(id: unknown): Promise<Row | null> {
      const res = await client.query(
        `select * from "${table}" where "${idColumn}" = $1`,
        [id],
      );
      return (res.rows[0] as Row) ?? null;
    },
    async create(data: Insert): Promise<Row> {
      const keys = Object.keys(data);
      const cols = keys.map((k) => `"${k}"`).join(", ");
      const params = keys.map((_, i) => `$${i + 1}`).join(", ");
      const res = await client.query(
        `insert into "${table}" (${cols}) values (${params}) returning *`,
        keys.map((k) => data[k]),
      );
      return res.rows[0] as Row;
    },
    async update(id: unknown, data: Update): Promise<Row | null> {
      const keys = Object.keys(data);
      if (keys.length === 0) return this.findById(id);
      const sets = keys.map((k, i) => `"${k}" = $${i + 1}`).join(", ");
      const res = await client.query(
        `update "${table}" set ${sets} where "${idColumn}" = $${keys.length + 1} returning *`,
        [...keys.map((k) => data[k]), id],
      );
      return (res.rows[0] as Row) ?? null;
    },
    async remove(id: unknown): Promise<void> {
      await client.query(`delete from "${table}" where "${idColumn}" = $1`, [id]);
    },
  };
}
"#;

/// Emit the generic factory and a binding per table, in model order.
pub fn generate_repositories(model: &SchemaModel) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');

    if !model.tables.is_empty() {
        let mut imports = Vec::new();
        for table in &model.tables {
            let pascal = table.name.to_pascal_case();
            imports.push(format!("{}Row", pascal));
            imports.push(format!("{}Insert", pascal));
            imports.push(format!("{}Update", pascal));
        }
        out.push_str(&format!(
            "import type {{\n  {},\n}} from \"./types\";\n\n",
            imports.join(",\n  ")
        ));
    }

    out.push_str(FACTORY);

    for table in &model.tables {
        let pascal = table.name.to_pascal_case();
        let camel = table.name.to_lower_camel_case();
        let id_column = table
            .columns
            .iter()
            .find(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .unwrap_or("id");

        out.push_str(&format!(
            "\nexport const {camel}Repository = (client: DbClient) =>\n  \
             createRepository<{pascal}Row, {pascal}Insert, {pascal}Update>(\
             client, \"{}\", \"{}\");\n",
            table.name, id_column
        ));
    }

    out
}
