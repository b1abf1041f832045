//! The rules that move e2e tests off inline Prisma/faker fixtures and onto
//! the `#tests/test-utils.ts` organization helpers.

use crate::error::Result;
use crate::rules::matcher::{MatchOptions, Shape};
use crate::rules::rewriter::{Captured, RewriteRule, RuleSet};

const FAKER_IMPORT: &str = "import { faker } from '@faker-js/faker'";
const PRISMA_IMPORT: &str = "import { prisma } from '#app/utils/db.server.ts'";
const PLAYWRIGHT_IMPORT: &str = "import { expect, test } from '#tests/playwright-utils.ts'";
const HELPERS_IMPORT: &str = "import { createTestOrganization, createTestOrganizationWithMultipleUsers } from '#tests/test-utils.ts'";

/// Opening of an inline organization fixture, up to the membership block.
const ORGANIZATION_HEAD: &str = "= await prisma.organization.create({ data: {
	name: faker.company.name(),
	slug: faker.helpers.slugify(faker.company.name()).toLowerCase(),
	description: faker.company.catchPhrase(),
	users: { create:";

const IDENTIFIER: &str = r"[A-Za-z_$][\w$]*";
const MEMBER_EXPR: &str = r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*";

/// An expression inside `expect(...)`, allowing one level of nested parentheses.
const ELEMENT_EXPR: &str = r"(?:[^()]|\([^()]*\))+";

const ROLE_PREFIX: &str = "org_role_";

/// Indentation for the follow-up lines of an assertion that did not start its line.
const CONTINUATION_INDENT: &str = "\t\t";

/// Build the rule set for the fixture migration, in application order.
pub fn fixture_migration_rules() -> Result<RuleSet> {
	Ok(RuleSet::new(vec![
		consolidate_imports()?,
		consolidate_imports_fallback()?,
		single_user_organization()?,
		multi_user_organization()?,
		aria_label_or_visible()?,
	]))
}

/// Turn an internal role id such as `'org_role_admin'` into the helper's role name.
pub fn role_name(role_id: &str) -> &str {
	let unquoted = role_id.trim_matches(|c: char| matches!(c, '\'' | '"'));
	unquoted.strip_prefix(ROLE_PREFIX).unwrap_or(unquoted)
}

fn consolidate_imports() -> Result<RewriteRule> {
	let pattern = Shape::new()
		.code(FAKER_IMPORT)
		.code(PRISMA_IMPORT)
		.code(PLAYWRIGHT_IMPORT)
		.build();
	RewriteRule::new(
		"consolidate-imports",
		&pattern,
		MatchOptions::PLAIN,
		|captured| {
			Ok(format!(
				"{PLAYWRIGHT_IMPORT}{}{HELPERS_IMPORT}",
				captured.line_ending()
			))
		},
	)
}

/// Files that never imported the playwright utilities.
///
/// Precondition: `consolidate-imports` already ran in this pass. Both rules
/// start with the faker and prisma imports, so running this one first would
/// strand the playwright import below the helper import.
fn consolidate_imports_fallback() -> Result<RewriteRule> {
	let pattern = Shape::new().code(FAKER_IMPORT).code(PRISMA_IMPORT).build();
	RewriteRule::new(
		"consolidate-imports-fallback",
		&pattern,
		MatchOptions::PLAIN,
		|_| Ok(HELPERS_IMPORT.to_string()),
	)
}

fn single_user_organization() -> Result<RewriteRule> {
	let pattern = Shape::new()
		.code("const")
		.capture("binding", IDENTIFIER)
		.code(ORGANIZATION_HEAD)
		.code("{ userId:")
		.capture("user", MEMBER_EXPR)
		.code(", organizationRoleId: 'org_role_admin' } } } })")
		.build();
	RewriteRule::new(
		"single-user-organization",
		&pattern,
		MatchOptions::STRUCTURAL,
		build_single_user_organization,
	)
}

fn build_single_user_organization(captured: &Captured<'_>) -> Result<String> {
	Ok(format!(
		"const {} = await createTestOrganization({}, 'admin')",
		captured.group("binding")?,
		captured.group("user")?,
	))
}

fn multi_user_organization() -> Result<RewriteRule> {
	let pattern = Shape::new()
		.code("const")
		.capture("binding", IDENTIFIER)
		.code(ORGANIZATION_HEAD)
		.code("[ { userId:")
		.capture("first_user", MEMBER_EXPR)
		.code(", organizationRoleId:")
		.capture("first_role", "'org_role_admin'")
		.code("}, { userId:")
		.capture("second_user", MEMBER_EXPR)
		.code(", organizationRoleId:")
		.capture("second_role", "'org_role_member'")
		.code("} ] } } })")
		.build();
	RewriteRule::new(
		"multi-user-organization",
		&pattern,
		MatchOptions::STRUCTURAL,
		build_multi_user_organization,
	)
}

fn build_multi_user_organization(captured: &Captured<'_>) -> Result<String> {
	let members = [("first_user", "first_role"), ("second_user", "second_role")]
		.into_iter()
		.map(|(user, role)| -> Result<String> {
			Ok(format!(
				"{{ userId: {}, role: '{}' }}",
				captured.group(user)?,
				role_name(captured.group(role)?),
			))
		})
		.collect::<Result<Vec<_>>>()?;

	Ok(format!(
		"const {} = await createTestOrganizationWithMultipleUsers([{}])",
		captured.group("binding")?,
		members.join(", "),
	))
}

fn aria_label_or_visible() -> Result<RewriteRule> {
	let pattern = Shape::new()
		.line_indent("indent")
		.code("await expect(")
		.capture("labelled", ELEMENT_EXPR)
		.code(").toHaveAttribute('aria-label')")
		.code(".or(expect(")
		.capture("visible", ELEMENT_EXPR)
		.code(").toBeVisible())")
		.build();
	RewriteRule::new(
		"aria-label-or-visible",
		&pattern,
		MatchOptions {
			multi_line: true,
			dot_matches_new_line: false,
		},
		build_aria_label_or_visible,
	)
}

fn build_aria_label_or_visible(captured: &Captured<'_>) -> Result<String> {
	let (first, rest) = match captured.optional_group("indent") {
		Some(indent) => (indent, indent),
		None => ("", CONTINUATION_INDENT),
	};
	let eol = captured.line_ending();
	Ok(format!(
		"{first}const hasAriaLabel = await {}.getAttribute('aria-label'){eol}\
		 {rest}const hasLabel = await {}.isVisible(){eol}\
		 {rest}expect(hasAriaLabel || hasLabel).toBeTruthy()",
		captured.group("labelled")?,
		captured.group("visible")?,
	))
}

#[cfg(test)]
mod tests {
	use super::*;

	const OLD_IMPORTS: &str = "import { faker } from '@faker-js/faker'
import { prisma } from '#app/utils/db.server.ts'
import { expect, test } from '#tests/playwright-utils.ts'
";

	const NEW_IMPORTS: &str = "import { expect, test } from '#tests/playwright-utils.ts'
import { createTestOrganization, createTestOrganizationWithMultipleUsers } from '#tests/test-utils.ts'
";

	const SINGLE_USER_ORG: &str = "\t\tconst org = await prisma.organization.create({
\t\t\tdata: {
\t\t\t\tname: faker.company.name(),
\t\t\t\tslug: faker.helpers.slugify(faker.company.name()).toLowerCase(),
\t\t\t\tdescription: faker.company.catchPhrase(),
\t\t\t\tusers: {
\t\t\t\t\tcreate: {
\t\t\t\t\t\tuserId: user.id,
\t\t\t\t\t\torganizationRoleId: 'org_role_admin'
\t\t\t\t\t}
\t\t\t\t}
\t\t\t}
\t\t})
";

	const MULTI_USER_ORG: &str = "\t\tconst org = await prisma.organization.create({
\t\t\tdata: {
\t\t\t\tname: faker.company.name(),
\t\t\t\tslug: faker.helpers.slugify(faker.company.name()).toLowerCase(),
\t\t\t\tdescription: faker.company.catchPhrase(),
\t\t\t\tusers: {
\t\t\t\t\tcreate: [
\t\t\t\t\t\t{ userId: user.id, organizationRoleId: 'org_role_admin' },
\t\t\t\t\t\t{ userId: otherUser.id, organizationRoleId: 'org_role_member' }
\t\t\t\t\t]
\t\t\t\t}
\t\t\t}
\t\t})
";

	const ARIA_ASSERTION: &str = "\t\tawait expect(themeToggle).toHaveAttribute('aria-label')
\t\t\t.or(expect(page.getByText(/theme/i)).toBeVisible())
";

	fn migrate(document: &str) -> String {
		fixture_migration_rules().unwrap().apply_all(document).unwrap()
	}

	#[test]
	fn test_rule_order() {
		let rules = fixture_migration_rules().unwrap();
		let names: Vec<_> = rules.rules().iter().map(|rule| rule.name).collect();
		assert_eq!(
			names,
			vec![
				"consolidate-imports",
				"consolidate-imports-fallback",
				"single-user-organization",
				"multi-user-organization",
				"aria-label-or-visible",
			]
		);
	}

	#[test]
	fn test_three_line_imports_consolidated() {
		let document = format!("{OLD_IMPORTS}\ntest('x', () => {{}})\n");
		assert_eq!(
			migrate(&document),
			format!("{NEW_IMPORTS}\ntest('x', () => {{}})\n")
		);
	}

	#[test]
	fn test_fallback_does_not_rematch_consolidated_imports() {
		let rules = fixture_migration_rules().unwrap();
		let after_first = rules.rules()[0].apply(OLD_IMPORTS).unwrap();
		assert_eq!(after_first.replacements, 1);
		let after_second = rules.rules()[1].apply(&after_first.text).unwrap();
		assert_eq!(after_second.replacements, 0);
		assert_eq!(after_second.text, NEW_IMPORTS);
	}

	#[test]
	fn test_two_line_imports_use_fallback() {
		let document = "import { faker } from '@faker-js/faker'
import { prisma } from '#app/utils/db.server.ts'
import { test } from '@playwright/test'
";
		let rules = fixture_migration_rules().unwrap();
		assert_eq!(rules.rules()[0].apply(document).unwrap().replacements, 0);
		assert_eq!(
			rules.apply_all(document).unwrap(),
			"import { createTestOrganization, createTestOrganizationWithMultipleUsers } from '#tests/test-utils.ts'
import { test } from '@playwright/test'
"
		);
	}

	#[test]
	fn test_import_specifiers_must_match_exactly() {
		let document = "import { faker } from '@faker-js/faker'
import { prisma } from '#app/utils/db.ts'
";
		assert_eq!(migrate(document), document);
	}

	#[test]
	fn test_single_user_organization() {
		assert_eq!(
			migrate(SINGLE_USER_ORG),
			"\t\tconst org = await createTestOrganization(user.id, 'admin')\n"
		);
	}

	#[test]
	fn test_single_user_organization_on_one_line() {
		let document = "const team = await prisma.organization.create({ data: { name: faker.company.name(), slug: faker.helpers.slugify(faker.company.name()).toLowerCase(), description: faker.company.catchPhrase(), users: { create: { userId: owner.id, organizationRoleId: 'org_role_admin' } } } })";
		assert_eq!(
			migrate(document),
			"const team = await createTestOrganization(owner.id, 'admin')"
		);
	}

	#[test]
	fn test_multi_user_organization() {
		assert_eq!(
			migrate(MULTI_USER_ORG),
			"\t\tconst org = await createTestOrganizationWithMultipleUsers([{ userId: user.id, role: 'admin' }, { userId: otherUser.id, role: 'member' }])\n"
		);
	}

	#[test]
	fn test_partial_organization_left_unchanged() {
		// `members`/`role` is a different schema shape; it is not touched.
		let document = "const org1 = await prisma.organization.create({
	data: {
		name: faker.company.name(),
		slug: faker.helpers.slugify(faker.company.name()).toLowerCase(),
		description: faker.company.catchPhrase(),
		members: {
			create: {
				userId: user.id,
				role: 'OWNER'
			}
		}
	}
})
";
		assert_eq!(migrate(document), document);
	}

	#[test]
	fn test_single_user_with_member_role_left_unchanged() {
		let document = SINGLE_USER_ORG.replace("org_role_admin", "org_role_member");
		assert_eq!(migrate(&document), document);
	}

	#[test]
	fn test_aria_label_or_visible() {
		assert_eq!(
			migrate(ARIA_ASSERTION),
			"\t\tconst hasAriaLabel = await themeToggle.getAttribute('aria-label')
\t\tconst hasLabel = await page.getByText(/theme/i).isVisible()
\t\texpect(hasAriaLabel || hasLabel).toBeTruthy()
"
		);
	}

	#[test]
	fn test_aria_label_or_visible_single_line() {
		let document = "await expect(a).toHaveAttribute('aria-label').or(expect(b).toBeVisible())";
		assert_eq!(
			migrate(document),
			"const hasAriaLabel = await a.getAttribute('aria-label')
const hasLabel = await b.isVisible()
expect(hasAriaLabel || hasLabel).toBeTruthy()"
		);
	}

	#[test]
	fn test_aria_label_or_visible_mid_line() {
		let document = "test('t', async () => { await expect(a).toHaveAttribute('aria-label').or(expect(b).toBeVisible()) })\n";
		assert_eq!(
			migrate(document),
			"test('t', async () => { const hasAriaLabel = await a.getAttribute('aria-label')
\t\tconst hasLabel = await b.isVisible()
\t\texpect(hasAriaLabel || hasLabel).toBeTruthy() })\n"
		);
	}

	#[test]
	fn test_aria_label_or_visible_after_statement_prefix() {
		let document = "\tif (x) await expect(a).toHaveAttribute('aria-label').or(expect(b).toBeVisible())";
		let migrated = migrate(document);
		assert!(migrated.starts_with("\tif (x) const hasAriaLabel = await a.getAttribute('aria-label')\n"));
		assert_eq!(migrate(&migrated), migrated);
	}

	#[test]
	fn test_crlf_line_endings_preserved() {
		let document = format!("{OLD_IMPORTS}\n{ARIA_ASSERTION}").replace('\n', "\r\n");
		let migrated = migrate(&document);
		assert_eq!(
			migrated,
			format!(
				"{NEW_IMPORTS}\n\t\tconst hasAriaLabel = await themeToggle.getAttribute('aria-label')
\t\tconst hasLabel = await page.getByText(/theme/i).isVisible()
\t\texpect(hasAriaLabel || hasLabel).toBeTruthy()
"
			)
			.replace('\n', "\r\n")
		);
		assert!(!migrated.replace("\r\n", "").contains('\n'));
	}

	#[test]
	fn test_imports_separated_by_blank_lines_still_consolidated() {
		let document = "import { faker } from '@faker-js/faker'\n\n\nimport { prisma } from '#app/utils/db.server.ts'\n";
		assert_eq!(
			migrate(document),
			"import { createTestOrganization, createTestOrganizationWithMultipleUsers } from '#tests/test-utils.ts'\n"
		);
	}

	#[test]
	fn test_visible_or_visible_left_unchanged() {
		let document = "\t\t\tawait expect(page.getByText(/photo updated/i)).toBeVisible()
\t\t\t\t.or(expect(page.locator('img')).toBeVisible())
";
		assert_eq!(migrate(document), document);
	}

	#[test]
	fn test_full_document_and_idempotence() {
		let document = format!(
			"{OLD_IMPORTS}\ntest.describe('Orgs', () => {{\n\ttest('a', async () => {{\n{SINGLE_USER_ORG}\n{MULTI_USER_ORG}\n{ARIA_ASSERTION}\t}})\n}})\n"
		);
		let once = migrate(&document);
		assert!(once.starts_with(NEW_IMPORTS));
		assert!(once.contains("createTestOrganization(user.id, 'admin')"));
		assert!(once.contains("createTestOrganizationWithMultipleUsers(["));
		assert!(once.contains("expect(hasAriaLabel || hasLabel).toBeTruthy()"));
		assert!(!once.contains("prisma"));
		assert!(!once.contains("faker"));
		assert_eq!(migrate(&once), once);
	}

	#[test]
	fn test_document_without_patterns_unchanged() {
		let document = "import { test } from '@playwright/test'\n\ntest('noop', async ({ page }) => {\n\tawait page.goto('/')\n})\n";
		assert_eq!(migrate(document), document);
	}

	#[test]
	fn test_role_name() {
		assert_eq!(role_name("'org_role_admin'"), "admin");
		assert_eq!(role_name("org_role_member"), "member");
		assert_eq!(role_name("'viewer'"), "viewer");
	}
}
